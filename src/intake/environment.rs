/// Read access to the ambient browser context the form tags leads with.
///
/// Every accessor is infallible: an implementation that cannot read a value
/// returns `None` and the corresponding tracking field is left out.
pub trait BrowserEnvironment {
    /// `document.referrer`; blank means "opened directly".
    fn referrer(&self) -> Option<String>;
    /// Raw `window.location.search`, leading `?` included.
    fn query_string(&self) -> Option<String>;
    fn user_agent(&self) -> Option<String>;
    /// `Date#getTimezoneOffset()` in minutes.
    fn tz_offset_minutes(&self) -> Option<f64>;
}

/// Fixed capture of the browser context, taken once and replayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentSnapshot {
    pub referrer: Option<String>,
    pub query_string: Option<String>,
    pub user_agent: Option<String>,
    pub tz_offset_minutes: Option<f64>,
}

impl BrowserEnvironment for EnvironmentSnapshot {
    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }

    fn query_string(&self) -> Option<String> {
        self.query_string.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn tz_offset_minutes(&self) -> Option<f64> {
        self.tz_offset_minutes
    }
}
