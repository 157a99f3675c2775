use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::new_lead::NewLead;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Row-insert client for the hosted store's REST surface (`/rest/v1/{table}`).
pub struct StoreClient {
    http_client: Client,
    base_url: String,
    table: String,
    service_role_key: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("The store rejected the insert with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Failed to reach the store.")]
    Transport(#[from] reqwest::Error),
}

impl StoreClient {
    pub fn new(
        base_url: String,
        table: String,
        service_role_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<StoreClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(StoreClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            table,
            service_role_key,
        })
    }

    pub fn insert_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    #[tracing::instrument(
        name = "Insert a new lead into the store",
        skip(self, lead),
        fields(
            table = %self.table,
            lead_contact = %lead.contact()
        )
    )]
    pub async fn insert_lead(&self, lead: &NewLead) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(self.insert_url())
            .header("apikey", self.service_role_key.expose_secret())
            .header(
                "Authorization",
                format!("Bearer {}", self.service_role_key.expose_secret()),
            )
            .header("Prefer", "return=minimal")
            .json(lead)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            // Body of a failed response is kept for the logs only.
            let body = response.text().await.unwrap_or_default();

            return Err(StoreError::Rejected { status, body });
        }

        Ok(())
    }
}
