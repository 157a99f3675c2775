use crate::domain::contact::ContactField;
use crate::domain::locale::Locale;

/// Referrer value sent when the page was opened without one.
pub const DIRECT_REFERRER: &str = "direct";

/// Ambient, non-authoritative context attached to a lead for analytics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz_offset_min: Option<i64>,
}

/// JSON body the intake form posts to the subscribe endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LeadPayload {
    #[serde(flatten)]
    pub contact: ContactField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(flatten)]
    pub tracking: TrackingMetadata,
}
