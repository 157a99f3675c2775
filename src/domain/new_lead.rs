use serde_json::{Map, Value};

use crate::domain::contact::{ContactField, ContactScheme, SubscriberContact};
use crate::domain::optional_text::normalize_optional_text;
use crate::domain::tz_offset::{TzOffsetInput, TzOffsetMinutes};
use crate::domain::utm_params::UtmParams;

const CONTACT_KEYS: [&str; 2] = ["contact", "email"];
const SPECIALTY_KEYS: [&str; 3] = ["specialty", "name", "telegram"];

/// Loosely typed view of a subscribe request. A field holding the wrong JSON
/// type is treated as missing.
#[derive(Debug, Default, Clone)]
pub struct NewLeadBody {
    pub contact: Option<String>,
    pub specialty: Option<String>,
    pub referrer: Option<String>,
    pub utm: Option<String>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    pub tz_offset_min: Option<TzOffsetInput>,
}

impl NewLeadBody {
    /// Anything other than a JSON object yields an empty body.
    pub fn from_json(value: Value) -> NewLeadBody {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return NewLeadBody::default(),
        };

        NewLeadBody {
            contact: first_string(&fields, &CONTACT_KEYS),
            specialty: first_string(&fields, &SPECIALTY_KEYS),
            referrer: first_string(&fields, &["referrer"]),
            utm: first_string(&fields, &["utm"]),
            user_agent: first_string(&fields, &["userAgent"]),
            locale: first_string(&fields, &["locale"]),
            tz_offset_min: fields
                .get("tzOffsetMin")
                .cloned()
                .and_then(|value| serde_json::from_value(value).ok()),
        }
    }
}

fn first_string(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Normalized row handed to the store. Every optional column is serialized,
/// explicitly `null` when absent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewLead {
    #[serde(flatten)]
    pub contact: ContactField,
    pub specialty: Option<String>,
    pub referrer: Option<String>,
    pub utm_params: Option<UtmParams>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    pub tz_offset_min: Option<TzOffsetMinutes>,
}

impl NewLead {
    pub fn parse(body: NewLeadBody, scheme: ContactScheme) -> Result<NewLead, String> {
        let contact = match body.contact {
            Some(contact) => SubscriberContact::parse(contact, scheme)?,
            None => return Err(scheme.error_message().to_string()),
        };

        Ok(NewLead {
            contact: contact.to_field(),
            specialty: normalize_optional_text(body.specialty.as_deref()),
            referrer: normalize_optional_text(body.referrer.as_deref()),
            utm_params: body.utm.as_deref().and_then(UtmParams::parse),
            user_agent: normalize_optional_text(body.user_agent.as_deref()),
            locale: normalize_optional_text(body.locale.as_deref()),
            tz_offset_min: body.tz_offset_min.as_ref().and_then(TzOffsetMinutes::parse),
        })
    }

    pub fn contact(&self) -> &str {
        self.contact.value()
    }
}
