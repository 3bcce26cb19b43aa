//! Chop client submission flow
//!
//! This module implements the write path as a state machine: validate the
//! typed URL, derive its code, resolve the expiry selection, make exactly
//! one backend call, and map the outcome to exactly one user-visible notice.
//! After a success the form clears, the expiry selection resets to the
//! default preset, and a 5-tick cooldown disables further submissions.

use std::fmt;

use chrono::Utc;
use url::Url;

use crate::backend::BackendClient;
use crate::expiry::ExpirySelection;
use crate::hash::derive_code;
use crate::model::ShortLink;

/// Cooldown length after a successful submission, in one-second ticks
pub const COOLDOWN_TICKS: u8 = 5;

/// The one notice shown per submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The input did not parse as an absolute http(s) URL; nothing was sent
    InvalidUrl,
    /// The backend reported its rate-limit sentinel; retry after cooldown
    RateLimited,
    /// Any other backend or transport failure
    Failed,
    /// The mapping was persisted
    Chopped {
        /// The newly created mapping, for display
        short_link: ShortLink,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidUrl => write!(f, "That doesn't look like a valid http(s) URL"),
            Notice::RateLimited => write!(f, "Too many chops, take a breather and retry"),
            Notice::Failed => write!(f, "Something went wrong saving your link"),
            Notice::Chopped { short_link } => match &short_link.expiry {
                Some(at) => write!(f, "Chopped! /{} (expires {})", short_link.code, at),
                None => write!(f, "Chopped! /{} (never expires)", short_link.code),
            },
        }
    }
}

/// Validates a user-typed URL
///
/// Only absolute URLs with scheme http or https are accepted; everything
/// else is rejected before any network call.
pub fn validate(input: &str) -> Option<Url> {
    let parsed = Url::parse(input).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}

/// Form state for the chop client
///
/// One instance per client; all state is component-local. The cooldown is a
/// plain counter: the driver owns the timer and calls [`ChopForm::tick`]
/// once a second, rescheduling on every state change so timers never
/// overlap. Nothing here survives a reload.
pub struct ChopForm {
    /// The URL as typed; preserved on every failure so the user can retry
    pub url_input: String,

    /// Current expiry choice; resets to the default after a success
    pub expiry: ExpirySelection,

    backend: BackendClient,
    loading: bool,
    cooldown: u8,
}

impl ChopForm {
    /// A fresh form bound to a backend client
    pub fn new(backend: BackendClient) -> Self {
        ChopForm {
            url_input: String::new(),
            expiry: ExpirySelection::default(),
            backend,
            loading: false,
            cooldown: 0,
        }
    }

    /// Replaces the URL input buffer
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url_input = url.into();
    }

    /// Replaces the expiry selection
    pub fn select_expiry(&mut self, selection: ExpirySelection) {
        self.expiry = selection;
    }

    /// Whether the submit control is enabled
    ///
    /// Disabled while a call is in flight or the post-success cooldown is
    /// still counting down; this is what prevents duplicate writes from one
    /// client instance.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.cooldown == 0
    }

    /// Seconds left on the cooldown counter
    pub fn cooldown_remaining(&self) -> u8 {
        self.cooldown
    }

    /// One timer tick; decrements the cooldown toward zero
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Runs one submission attempt
    ///
    /// Returns `None` when the control is disabled (in flight or cooling
    /// down); otherwise exactly one [`Notice`]:
    ///
    /// - invalid input: [`Notice::InvalidUrl`], no network call, state kept;
    /// - rate limited: [`Notice::RateLimited`], state kept for retry;
    /// - other failure: [`Notice::Failed`], state kept;
    /// - success: [`Notice::Chopped`], input cleared, expiry reset to the
    ///   default preset, cooldown started.
    ///
    /// No attempt is retried automatically and an issued call is never
    /// cancelled; the form just waits for resolution.
    pub async fn submit(&mut self) -> Option<Notice> {
        if !self.can_submit() {
            return None;
        }

        // Validate with the parser but submit the string as typed; the code
        // must be derived from the exact text the backend will store
        if validate(&self.url_input).is_none() {
            return Some(Notice::InvalidUrl);
        }
        let target = self.url_input.clone();

        let code = derive_code(&target);
        let expiry = self.expiry.resolve(Utc::now());

        self.loading = true;
        let result = self.backend.save_short_link(&target, &code, expiry).await;
        self.loading = false;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "backend call failed");
                return Some(Notice::Failed);
            }
        };

        if let Some(error) = response.error {
            tracing::debug!(message = %error.message, "backend rejected chop");
            if error.is_rate_limit() {
                return Some(Notice::RateLimited);
            }
            return Some(Notice::Failed);
        }

        let short_link = ShortLink {
            code,
            target_url: target,
            expiry,
        };

        self.url_input.clear();
        self.expiry = ExpirySelection::default();
        self.cooldown = COOLDOWN_TICKS;

        Some(Notice::Chopped { short_link })
    }
}
