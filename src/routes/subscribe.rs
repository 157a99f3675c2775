use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::contact::ContactScheme;
use crate::domain::new_lead::{NewLead, NewLeadBody};
use crate::routes::error_chain_fmt;
use crate::store_client::{StoreClient, StoreError};

/// `{ ok, error? }` acknowledgement returned by the subscribe endpoint.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SubscribeResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubscribeResponse {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

#[tracing::instrument(
    name = "Creating a new lead handler",
    skip(body, store_client, contact_scheme),
    fields(
        contact_scheme = %contact_scheme.as_str(),
        lead_contact = tracing::field::Empty,
        utm_source = tracing::field::Empty
    )
)]
pub async fn subscribe(
    body: web::Bytes,
    store_client: web::Data<StoreClient>,
    contact_scheme: web::Data<ContactScheme>,
) -> Result<HttpResponse, SubscribeError> {
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(SubscribeError::InvalidJson)?;
    let new_lead = NewLead::parse(NewLeadBody::from_json(payload), **contact_scheme)
        .map_err(SubscribeError::ValidationError)?;

    let span = tracing::Span::current();
    span.record("lead_contact", tracing::field::display(new_lead.contact()));
    if let Some(source) = new_lead.utm_params.as_ref().and_then(|utm| utm.get("utm_source")) {
        span.record("utm_source", tracing::field::display(source));
    }

    store_client
        .insert_lead(&new_lead)
        .await
        .map_err(SubscribeError::from)?;

    Ok(HttpResponse::Ok().json(SubscribeResponse::accepted()))
}

/// Fallback for every verb other than POST on the subscribe resource.
#[tracing::instrument(name = "Rejecting a non-POST subscribe request")]
pub async fn subscribe_method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(SubscribeResponse::failed("Method not allowed"))
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("{0}")]
    ValidationError(String),
    #[error("DB error")]
    StoreRejected(#[source] StoreError),
    #[error("Server error")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for SubscribeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected { .. } => {
                tracing::error!("Store insert error: {:?}", err);
                SubscribeError::StoreRejected(err)
            }
            StoreError::Transport(_) => {
                tracing::error!("Store request error: {:?}", err);
                SubscribeError::StoreUnavailable(err)
            }
        }
    }
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::StoreRejected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SubscribeError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Only the top-level message reaches the caller, the source chain stays in the logs.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubscribeResponse::failed(self.to_string()))
    }
}
