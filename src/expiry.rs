//! Expiry selection and resolution
//!
//! The form offers fixed offsets (1, 6 or 12 hours), "never", or a custom
//! absolute timestamp. The selection is client-local state: it is resolved to
//! an absolute timestamp (or null) at submission time and reset to the
//! default preset after every successful submission.

use chrono::{DateTime, Duration, Utc};

/// One of the expiry choices the form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirySelection {
    /// Expire one hour after submission (the default preset)
    OneHour,
    /// Expire six hours after submission
    SixHours,
    /// Expire twelve hours after submission
    TwelveHours,
    /// Never expire
    Never,
    /// Expire at a user-picked absolute timestamp
    Custom(DateTime<Utc>),
}

impl Default for ExpirySelection {
    fn default() -> Self {
        ExpirySelection::OneHour
    }
}

impl ExpirySelection {
    /// Parses a preset key as the form submits it ("1", "6", "12", "never")
    ///
    /// Custom timestamps come through the date picker, not this path.
    pub fn from_preset(key: &str) -> Option<Self> {
        match key {
            "1" => Some(ExpirySelection::OneHour),
            "6" => Some(ExpirySelection::SixHours),
            "12" => Some(ExpirySelection::TwelveHours),
            "never" => Some(ExpirySelection::Never),
            _ => None,
        }
    }

    /// Resolves the selection against the given submission time
    ///
    /// Fixed presets become `now + offset`, `Never` becomes `None`, and a
    /// custom pick passes through unchanged.
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ExpirySelection::OneHour => Some(now + Duration::hours(1)),
            ExpirySelection::SixHours => Some(now + Duration::hours(6)),
            ExpirySelection::TwelveHours => Some(now + Duration::hours(12)),
            ExpirySelection::Never => None,
            ExpirySelection::Custom(at) => Some(*at),
        }
    }
}
