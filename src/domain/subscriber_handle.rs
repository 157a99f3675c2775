use once_cell::sync::Lazy;
use regex::Regex;

/// Hosts a profile link may point at.
pub const ALLOWED_PROFILE_HOSTS: [&str; 3] = ["t.me", "telegram.me", "instagram.com"];

const MIN_HANDLE_CHARS: usize = 4;
const MAX_HANDLE_CHARS: usize = 32;
const MIN_PROFILE_PATH_CHARS: usize = 3;

static HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^@[A-Za-z0-9_.\-]{{{},{}}}$",
        MIN_HANDLE_CHARS, MAX_HANDLE_CHARS
    ))
    .expect("handle regex is valid")
});

static PROFILE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let hosts = ALLOWED_PROFILE_HOSTS
        .iter()
        .map(|host| regex::escape(host))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(
        r"(?i)^https?://({})/[A-Za-z0-9_.\-]{{{},{}}}$",
        hosts, MIN_PROFILE_PATH_CHARS, MAX_HANDLE_CHARS
    ))
    .expect("profile url regex is valid")
});

/// Accepts `@name` handles or a profile link on one of [`ALLOWED_PROFILE_HOSTS`].
pub fn is_valid_handle(value: &str) -> bool {
    HANDLE_REGEX.is_match(value) || PROFILE_URL_REGEX.is_match(value)
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SubscriberHandle(String);

impl SubscriberHandle {
    pub fn parse(handle: String) -> Result<SubscriberHandle, String> {
        let handle = handle.trim();

        if !is_valid_handle(handle) {
            return Err(format!("{} is not a valid handle or profile link", handle));
        }

        Ok(Self(handle.to_string()))
    }
}

impl AsRef<str> for SubscriberHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
