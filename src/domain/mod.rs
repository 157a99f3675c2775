pub mod contact;
pub mod locale;
pub mod new_lead;
pub mod optional_text;
pub mod subscriber_email;
pub mod subscriber_handle;
pub mod tracking;
pub mod tz_offset;
pub mod utm_params;
