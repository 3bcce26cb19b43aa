//! Edge request classification and forwarding
//!
//! This middleware runs in front of the application for every inbound
//! request. It decides, per request and with no carryover, between exactly
//! two outcomes: PASSTHROUGH (hand the request to the inner router
//! unchanged) or FORWARD (send the client to the backend resolver with the
//! extracted short code as the trailing path segment).

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::{ForwardMode, RouterConfig};
use crate::route::AppState;

/// Per-request classification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Not a short-code request; the inner router handles it
    Passthrough,
    /// Candidate short-code request; forward the extracted code
    Forward(String),
}

/// Classifies a request path
///
/// A path is a candidate unless it is exactly the root, contains a literal
/// '.' (static-asset exclusion), or starts with one of the configured
/// reserved prefixes, checked in order. For a candidate, the code is the
/// last non-empty '/'-separated segment; a path with no such segment is not
/// a candidate after all.
pub fn classify(path: &str, config: &RouterConfig) -> Action {
    if path == "/" || path.contains('.') {
        return Action::Passthrough;
    }

    for prefix in &config.reserved_prefixes {
        if path.starts_with(prefix.as_str()) {
            return Action::Passthrough;
        }
    }

    match path.split('/').filter(|s| !s.is_empty()).next_back() {
        Some(code) => Action::Forward(code.to_string()),
        None => Action::Passthrough,
    }
}

/// Middleware applying [`classify`] to every inbound request
///
/// Forwarding behavior depends on the configured [`ForwardMode`]:
///
/// - `Redirect302` / `Redirect307` - answer with an HTTP redirect to
///   `<resolver-base>/<code>`; the resolver's host becomes visible in the
///   client's address bar.
/// - `Rewrite` - proxy the request to the same target and relay the
///   resolver's response, so the original host stays visible.
///
/// The middleware keeps no state between requests and does not translate
/// backend failures; in rewrite mode an unreachable resolver surfaces as a
/// 502 from the proxy hop.
pub async fn edge_router(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match classify(&path, &state.config) {
        Action::Passthrough => next.run(request).await,
        Action::Forward(code) => {
            let target = format!("{}/{}", state.config.resolver_base, code);
            tracing::debug!(%path, %code, %target, "forwarding short-code request");

            match state.config.forward_mode {
                // axum's Redirect has no 302 constructor, so build it by hand
                ForwardMode::Redirect302 => match HeaderValue::from_str(&target) {
                    Ok(location) => {
                        (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
                    }
                    Err(_) => StatusCode::BAD_GATEWAY.into_response(),
                },
                ForwardMode::Redirect307 => Redirect::temporary(&target).into_response(),
                ForwardMode::Rewrite => rewrite(&state, &target).await,
            }
        }
    }
}

/// Proxies a candidate request to the resolver and relays the answer
///
/// Redirects from the resolver are relayed, not followed, so the resolver's
/// own contract (redirect to the original URL, or not-found/expired) reaches
/// the client untouched.
async fn rewrite(state: &AppState, target: &str) -> Response {
    let upstream = match state.http.get(target).send().await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(%target, error = %err, "resolver unreachable during rewrite");
            return (StatusCode::BAD_GATEWAY, "resolver unreachable").into_response();
        }
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let location = upstream
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(%target, error = %err, "resolver body read failed during rewrite");
            return (StatusCode::BAD_GATEWAY, "resolver unreachable").into_response();
        }
    };

    let mut response = Response::builder().status(status);
    if let Some(loc) = location {
        if let Ok(value) = HeaderValue::from_str(&loc) {
            response = response.header(header::LOCATION, value);
        }
    }
    if let Some(ct) = content_type {
        if let Ok(value) = HeaderValue::from_str(&ct) {
            response = response.header(header::CONTENT_TYPE, value);
        }
    }

    response
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}
