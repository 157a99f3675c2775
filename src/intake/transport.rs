use reqwest::Client;
use std::time;

use crate::domain::tracking::LeadPayload;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// What came back from the subscribe endpoint once a request completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Accepted,
    Rejected(u16),
}

/// Sends one lead to the subscribe endpoint. `Err` means the request never
/// completed (connection refused, timeout, ...).
#[async_trait::async_trait]
pub trait LeadTransport: Send + Sync {
    async fn post_lead(&self, payload: &LeadPayload) -> Result<Delivery, anyhow::Error>;
}

pub struct HttpLeadTransport {
    http_client: Client,
    endpoint: String,
}

impl HttpLeadTransport {
    pub fn new(
        endpoint: String,
        timeout: Option<time::Duration>,
    ) -> Result<HttpLeadTransport, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(HttpLeadTransport {
            http_client,
            endpoint,
        })
    }
}

#[async_trait::async_trait]
impl LeadTransport for HttpLeadTransport {
    #[tracing::instrument(name = "Posting a lead to the subscribe endpoint", skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn post_lead(&self, payload: &LeadPayload) -> Result<Delivery, anyhow::Error> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            Ok(Delivery::Accepted)
        } else {
            Ok(Delivery::Rejected(status.as_u16()))
        }
    }
}
