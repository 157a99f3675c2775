//! The lead-capture form as seen from the page: local validation, tracking
//! capture, a single submission at a time and the transient UI feedback.
//!
//! The form never talks to a live browser. Ambient values come from a
//! [`BrowserEnvironment`] and requests go through a [`LeadTransport`], so the
//! whole flow runs (and is tested) as plain async Rust.

mod environment;
mod transport;

pub use environment::*;
pub use transport::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::contact::{ContactField, ContactScheme};
use crate::domain::locale::{CtaLabels, Locale};
use crate::domain::optional_text::normalize_optional_text;
use crate::domain::tracking::{LeadPayload, TrackingMetadata, DIRECT_REFERRER};
use crate::domain::tz_offset::TzOffsetMinutes;

/// How long the button stays on its "done" label before the form re-arms.
pub const RESET_DELAY: Duration = Duration::from_millis(2000);
/// Length of the shake cue on a rejected contact.
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeTiming {
    pub reset_delay: Duration,
    pub shake_duration: Duration,
}

impl Default for IntakeTiming {
    fn default() -> Self {
        Self {
            reset_delay: RESET_DELAY,
            shake_duration: SHAKE_DURATION,
        }
    }
}

/// Text pushed to the accessibility live region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Invalid(&'static str),
    Accepted,
    Failed,
    NetworkError,
}

impl Announcement {
    pub fn as_str(&self) -> &str {
        match self {
            Announcement::Invalid(message) => *message,
            Announcement::Accepted => "ok",
            Announcement::Failed => "error",
            Announcement::NetworkError => "network-error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A previous submission has not finished its cooldown yet.
    Busy,
    /// Local validation failed, nothing was sent.
    Invalid,
    Accepted,
    Failed,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub contact: String,
    pub specialty: String,
    pub error: Option<&'static str>,
    pub shaking: bool,
    pub submitting: bool,
    pub button_label: &'static str,
    pub announcement: Option<Announcement>,
}

impl FormState {
    fn new(labels: &CtaLabels) -> Self {
        Self {
            contact: String::new(),
            specialty: String::new(),
            error: None,
            shaking: false,
            submitting: false,
            button_label: labels.submit,
            announcement: None,
        }
    }
}

pub struct IntakeForm<E, T> {
    scheme: ContactScheme,
    locale: Locale,
    timing: IntakeTiming,
    environment: E,
    transport: T,
    state: Arc<Mutex<FormState>>,
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E, T> IntakeForm<E, T>
where
    E: BrowserEnvironment,
    T: LeadTransport,
{
    pub fn new(
        scheme: ContactScheme,
        locale: Locale,
        timing: IntakeTiming,
        environment: E,
        transport: T,
    ) -> Self {
        Self {
            scheme,
            locale,
            timing,
            environment,
            transport,
            state: Arc::new(Mutex::new(FormState::new(locale.cta()))),
        }
    }

    pub fn state(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub fn labels(&self) -> &'static CtaLabels {
        self.locale.cta()
    }

    /// Same rule the subscribe endpoint applies, after trimming.
    pub fn validate(&self, contact: &str) -> bool {
        self.scheme.is_valid(contact.trim())
    }

    pub fn build_tracking(&self) -> TrackingMetadata {
        let referrer = self
            .environment
            .referrer()
            .filter(|referrer| !referrer.trim().is_empty())
            .unwrap_or_else(|| DIRECT_REFERRER.to_string());

        TrackingMetadata {
            referrer: Some(referrer),
            utm: self.environment.query_string().filter(|qs| !qs.is_empty()),
            user_agent: self.environment.user_agent().filter(|ua| !ua.is_empty()),
            locale: self.locale,
            tz_offset_min: self
                .environment
                .tz_offset_minutes()
                .and_then(TzOffsetMinutes::from_minutes)
                .map(|offset| offset.minutes()),
        }
    }

    /// One attempt per call. While a previous attempt is in flight or cooling
    /// down the call returns [`SubmitOutcome::Busy`] without touching the network.
    #[tracing::instrument(
        name = "Submitting the intake form",
        skip(self, contact, specialty),
        fields(contact_scheme = %self.scheme.as_str(), locale = %self.locale.as_str())
    )]
    pub async fn submit(&self, contact: &str, specialty: Option<&str>) -> SubmitOutcome {
        let labels = self.labels();
        let trimmed = contact.trim().to_string();

        {
            let mut state = lock(&self.state);

            if state.submitting {
                tracing::debug!("Submission already in progress");
                return SubmitOutcome::Busy;
            }

            state.contact = contact.to_string();
            state.specialty = specialty.unwrap_or_default().to_string();

            if !self.validate(&trimmed) {
                let message = labels.invalid_for(self.scheme);
                state.error = Some(message);
                state.shaking = true;
                state.announcement = Some(Announcement::Invalid(message));
                drop(state);
                self.schedule_shake_end();
                return SubmitOutcome::Invalid;
            }

            state.error = None;
            state.submitting = true;
            state.button_label = labels.sending;
        }

        let payload = LeadPayload {
            contact: ContactField::new(self.scheme, trimmed),
            specialty: normalize_optional_text(specialty),
            tracking: self.build_tracking(),
        };

        let outcome = match self.transport.post_lead(&payload).await {
            Ok(Delivery::Accepted) => SubmitOutcome::Accepted,
            Ok(Delivery::Rejected(status)) => {
                tracing::warn!("Subscribe endpoint answered with status {}", status);
                SubmitOutcome::Failed
            }
            Err(err) => {
                tracing::warn!("Subscribe request failed: {:?}", err);
                SubmitOutcome::NetworkError
            }
        };

        {
            let mut state = lock(&self.state);

            // The button reads "done" either way; only the announcement tells them apart.
            state.button_label = labels.done;
            state.announcement = Some(match outcome {
                SubmitOutcome::Accepted => Announcement::Accepted,
                SubmitOutcome::NetworkError => Announcement::NetworkError,
                _ => Announcement::Failed,
            });

            if outcome == SubmitOutcome::Accepted {
                state.contact.clear();
                state.specialty.clear();
            }
        }

        self.schedule_reset();

        outcome
    }

    fn schedule_shake_end(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.timing.shake_duration;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&state).shaking = false;
        });
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.timing.reset_delay;
        let submit_label = self.labels().submit;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            state.submitting = false;
            state.button_label = submit_label;
        });
    }
}
