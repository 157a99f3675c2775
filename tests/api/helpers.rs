use once_cell::sync::Lazy;
use reqwest::Response;
use wiremock::MockServer;

use lead_intake::{
    config::{get_configuration_with, Settings, STORE_KEY_ENV, STORE_URL_ENV},
    domain::contact::ContactScheme,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

// Logs are only printed when TEST_LOG is set, e.g. `TEST_LOG=true cargo test`
static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber_name = String::from("test");
    let default_filter_level = String::from("debug");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const SERVICE_ROLE_KEY: &str = "test-service-role-key";

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub store_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        Self::spawn_app_with_scheme(ContactScheme::Handle).await
    }

    pub async fn spawn_app_with_scheme(contact_scheme: ContactScheme) -> TestApp {
        Lazy::force(&TRACING);

        let store_server = MockServer::start().await;
        let store_url = store_server.uri();
        let config = get_configuration_with(|name| match name {
            STORE_URL_ENV => Some(store_url.clone()),
            STORE_KEY_ENV => Some(String::from(SERVICE_ROLE_KEY)),
            _ => std::env::var(name).ok(),
        });
        let mut config = config.expect("Missing configuration file.");

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_contact_scheme(contact_scheme);

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        // Redirects are asserted on, not followed
        let api_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        TestApp {
            address,
            config,
            store_server,
            api_client,
        }
    }

    pub fn subscribe_url(&self) -> String {
        format!("{}/api/subscribe", self.address)
    }

    pub async fn post_subscribe(&self, body: serde_json::Value) -> Response {
        self.api_client
            .post(self.subscribe_url())
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_subscribe_raw(&self, body: &'static str) -> Response {
        self.api_client
            .post(self.subscribe_url())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Bodies the store received, in arrival order.
    pub async fn inserted_rows(&self) -> Vec<serde_json::Value> {
        self.store_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}
