//! Backend persistence RPC wrapper
//!
//! The backend owns all the hard parts (rate limiting, expiration storage,
//! collision resolution); this wrapper is deliberately thin. One remote
//! procedure, named parameters, a `{data, error}` envelope back.

use chrono::{DateTime, Utc};

use crate::config::ClientConfig;
use crate::model::{PersistRequest, RpcResponse};

/// Client for the backend persistence endpoint
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    rpc_url: String,
}

impl BackendClient {
    /// Builds a client for the configured RPC endpoint
    pub fn new(config: &ClientConfig) -> Self {
        BackendClient {
            http: reqwest::Client::new(),
            rpc_url: config.rpc_url(),
        }
    }

    /// Persists a `(url, code, expiry)` mapping
    ///
    /// The expiry is serialized as an RFC 3339 string, or null for "never".
    /// Transport and decode failures surface as `Err`; a backend-side
    /// rejection arrives as `Ok` with the `error` field populated, and is
    /// classified by the caller.
    pub async fn save_short_link(
        &self,
        target_url: &str,
        url_hash: &str,
        url_expiry: Option<DateTime<Utc>>,
    ) -> Result<RpcResponse, reqwest::Error> {
        let payload = PersistRequest {
            target_url: target_url.to_string(),
            url_hash: url_hash.to_string(),
            url_expiry: url_expiry.map(|at| at.to_rfc3339()),
        };

        self.http
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await?
            .json::<RpcResponse>()
            .await
    }
}
