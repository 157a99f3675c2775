use serde::Deserialize;

/// Raw `tzOffsetMin` as sent by the form: a JSON number, a numeric string, or garbage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TzOffsetInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// No real timezone sits more than a day away from UTC.
pub const MAX_OFFSET_MINUTES: f64 = 1440.0;

/// Timezone offset in minutes, as reported by `Date#getTimezoneOffset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct TzOffsetMinutes(i64);

impl TzOffsetMinutes {
    /// Non-finite values and offsets beyond [`MAX_OFFSET_MINUTES`] are rejected.
    pub fn from_minutes(minutes: f64) -> Option<TzOffsetMinutes> {
        if !minutes.is_finite() || minutes.abs() > MAX_OFFSET_MINUTES {
            return None;
        }

        Some(Self(minutes.round() as i64))
    }

    /// Non-finite or out-of-range numbers, blank strings and anything that is not a number
    /// all normalize to `None`.
    pub fn parse(input: &TzOffsetInput) -> Option<TzOffsetMinutes> {
        match input {
            TzOffsetInput::Number(minutes) => Self::from_minutes(*minutes),
            TzOffsetInput::Text(text) => {
                let text = text.trim();

                if text.is_empty() {
                    return None;
                }

                text.parse::<f64>().ok().and_then(Self::from_minutes)
            }
            TzOffsetInput::Other(_) => None,
        }
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }
}
