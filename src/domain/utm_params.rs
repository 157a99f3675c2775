use std::collections::BTreeMap;

/// Flat key/value view of a raw query string such as `?utm_source=x&utm_medium=y`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct UtmParams(BTreeMap<String, String>);

impl UtmParams {
    /// Returns `None` for blank or undecodable input and for a query with no pairs.
    /// A repeated key keeps its last value.
    pub fn parse(raw: &str) -> Option<UtmParams> {
        let raw = raw.trim();
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        if raw.is_empty() {
            return None;
        }

        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
            Ok(pairs) => pairs,
            Err(err) => {
                tracing::debug!("Ignoring unparseable utm query {:?}: {}", raw, err);
                return None;
            }
        };
        let params: BTreeMap<String, String> = pairs.into_iter().collect();

        if params.is_empty() {
            return None;
        }

        Some(Self(params))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}
