use lead_intake::config::get_configuration;
use lead_intake::startup::Application;
use lead_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        String::from("lead_intake"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    // A half-configured server never comes up: missing store secrets end the process here.
    let config = get_configuration().map_err(|err| {
        tracing::error!(error.message = %err, "Invalid configuration");
        err
    })?;
    let application = Application::build(config).await?;

    application.run_until_stop().await?;

    Ok(())
}
