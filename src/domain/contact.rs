use serde::{Deserialize, Serialize};

use crate::domain::subscriber_email::{is_valid_email, SubscriberEmail};
use crate::domain::subscriber_handle::{is_valid_handle, SubscriberHandle};

/// Which kind of contact a deployment collects. Exactly one is active at a time
/// and the same check runs on the form and on the subscribe endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactScheme {
    Email,
    #[default]
    Handle,
}

impl ContactScheme {
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            ContactScheme::Email => is_valid_email(value),
            ContactScheme::Handle => is_valid_handle(value),
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            ContactScheme::Email => "Invalid email",
            ContactScheme::Handle => "Invalid contact (expect @handle or link)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactScheme::Email => "email",
            ContactScheme::Handle => "handle",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SubscriberContact {
    Email(SubscriberEmail),
    Handle(SubscriberHandle),
}

impl SubscriberContact {
    pub fn parse(value: String, scheme: ContactScheme) -> Result<SubscriberContact, String> {
        match scheme {
            ContactScheme::Email => SubscriberEmail::parse(value)
                .map(SubscriberContact::Email)
                .map_err(|_| scheme.error_message().to_string()),
            ContactScheme::Handle => SubscriberHandle::parse(value)
                .map(SubscriberContact::Handle)
                .map_err(|_| scheme.error_message().to_string()),
        }
    }

    pub fn scheme(&self) -> ContactScheme {
        match self {
            SubscriberContact::Email(_) => ContactScheme::Email,
            SubscriberContact::Handle(_) => ContactScheme::Handle,
        }
    }

    pub fn to_field(&self) -> ContactField {
        ContactField::new(self.scheme(), self.as_ref().to_string())
    }
}

impl AsRef<str> for SubscriberContact {
    fn as_ref(&self) -> &str {
        match self {
            SubscriberContact::Email(email) => email.as_ref(),
            SubscriberContact::Handle(handle) => handle.as_ref(),
        }
    }
}

/// Contact value keyed by its scheme, meant to be flattened into a JSON object
/// as either `"contact"` or `"email"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContactField {
    Contact { contact: String },
    Email { email: String },
}

impl ContactField {
    pub fn new(scheme: ContactScheme, value: String) -> ContactField {
        match scheme {
            ContactScheme::Email => ContactField::Email { email: value },
            ContactScheme::Handle => ContactField::Contact { contact: value },
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ContactField::Contact { contact } => contact,
            ContactField::Email { email } => email,
        }
    }
}
