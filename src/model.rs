//! Data models shared by the edge router and the chop client
//!
//! This module defines the shapes that cross the wire: the persisted mapping
//! as both components see it, the RPC payload, and the `{data, error}`
//! envelope the backend answers with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error message substring the backend uses to signal throttling
///
/// Any other non-null error is treated as a generic failure.
pub const RATE_LIMIT_SENTINEL: &str = "Rate limit exceeded";

/// A persisted short-link mapping
///
/// The backend owns the record; both components only reference it. `code` is
/// a pure function of `target_url` (see [`crate::hash::derive_code`]); the
/// client computes it locally before the write, the backend never allocates
/// identifiers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShortLink {
    /// Fixed-length identifier, also the public URL path segment
    pub code: String,

    /// The original absolute URL; scheme is always http or https
    pub target_url: String,

    /// When the mapping stops resolving; `None` means it never expires
    pub expiry: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// The public short URL under the given edge host
    pub fn short_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.code)
    }
}

/// Payload of the backend persistence RPC
///
/// # Example
/// ```json
/// {
///   "target_url": "https://example.com/very/long/url",
///   "url_hash": "3f1a...",
///   "url_expiry": "2026-08-30T13:40:00+00:00"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PersistRequest {
    /// The original URL being chopped
    pub target_url: String,

    /// The precomputed short code
    pub url_hash: String,

    /// RFC 3339 expiry timestamp, or null for "never"
    pub url_expiry: Option<String>,
}

/// The `{data, error}` envelope every RPC answer arrives in
///
/// A response with both fields null is treated as a success with no payload.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RpcResponse {
    /// Opaque success payload; the client does not interpret it
    #[serde(default)]
    pub data: Option<serde_json::Value>,

    /// Populated when the backend rejected the write
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Backend-reported error
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    /// Human-readable message; matched against [`RATE_LIMIT_SENTINEL`]
    pub message: String,
}

impl RpcError {
    /// True when this error is the backend's throttling signal
    pub fn is_rate_limit(&self) -> bool {
        self.message.contains(RATE_LIMIT_SENTINEL)
    }
}
