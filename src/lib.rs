pub mod config;
pub mod domain;
pub mod intake;
pub mod routes;
pub mod startup;
pub mod store_client;
pub mod telemetry;
