use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::domain::contact::ContactScheme;
use crate::routes::{
    health_check, locale_fallback, sitemap, subscribe, subscribe_method_not_allowed,
};
use crate::store_client::StoreClient;

/// Public URL of the landing site.
pub struct ApplicationBaseUrl(pub String);

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        config
            .validate()
            .context("Store settings are incomplete.")?;

        let store_client = StoreClient::new(
            config.store.get_base_url(),
            config.store.get_table(),
            config.store.get_service_role_key(),
            Some(config.store.get_timeout()),
        )
        .context("Failed to build the store HTTP client.")?;

        let listener = TcpListener::bind(config.get_address())
            .with_context(|| format!("Failed to bind the address {}.", config.get_address()))?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            "Server listening on {}:{} with contact scheme '{}'",
            config.application.get_host(),
            port,
            config.get_contact_scheme().as_str()
        );

        let server = run(
            listener,
            store_client,
            config.get_contact_scheme(),
            config.get_app_base_url(),
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store_client: StoreClient,
    contact_scheme: ContactScheme,
    base_url: String,
) -> Result<Server, std::io::Error> {
    let store_client = web::Data::new(store_client);
    let contact_scheme = web::Data::new(contact_scheme);
    let base_url = web::Data::new(ApplicationBaseUrl(base_url));

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/sitemap.xml", web::get().to(sitemap))
            .service(
                web::resource("/api/subscribe")
                    .route(web::post().to(subscribe))
                    .default_service(web::to(subscribe_method_not_allowed)),
            )
            .default_service(web::to(locale_fallback))
            .app_data(store_client.clone())
            .app_data(contact_scheme.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
