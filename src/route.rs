//! Application wiring for the edge router
//!
//! This module builds the Axum router: a minimal inner application (the UI
//! placeholder at the root) wrapped in the edge classification middleware,
//! so every inbound request is classified before any route matching happens.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{middleware, Router};

use crate::config::RouterConfig;
use crate::middleware::edge_router;

/// State shared by the edge middleware across all requests
///
/// The config is read-only after startup; the reqwest client is only used
/// in rewrite mode and is cheap to clone (it is an Arc internally).
#[derive(Clone)]
pub struct AppState {
    /// Parsed and validated router configuration
    pub config: Arc<RouterConfig>,

    /// HTTP client for transparent rewrites; redirects are relayed, not
    /// followed
    pub http: reqwest::Client,
}

impl AppState {
    /// Builds the shared state from a validated configuration
    ///
    /// The no-redirect policy is load-bearing for rewrite mode: the
    /// resolver's redirect must be relayed, never followed. Failing to
    /// build such a client is a startup error, not something to paper over
    /// with a default client that follows redirects.
    pub fn new(config: RouterConfig) -> Self {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build the rewrite HTTP client");

        AppState {
            config: Arc::new(config),
            http,
        }
    }
}

/// Creates the edge router application
///
/// # Route Layout
///
/// - `GET /` - serves the UI placeholder (always passthrough)
/// - anything else - classified by the edge middleware; candidates are
///   forwarded to the resolver, everything else falls through to a 404
///
/// # Example Usage
///
/// ```no_run
/// # use linkchop::config::RouterConfig;
/// # use linkchop::route::{create_app, AppState};
/// let state = AppState::new(RouterConfig::default());
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), edge_router))
        .with_state(state)
}

/// The root page; a stand-in for the single-page UI bundle
async fn index() -> &'static str {
    "LinkChop"
}

/// Fallback for passthrough paths nothing else matched
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
