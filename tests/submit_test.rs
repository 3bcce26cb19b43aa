//! Integration tests for the chop client submission flow
//!
//! These tests run the full write path against a live mock backend:
//! - Payload contents (target_url, url_hash, url_expiry)
//! - Expiry preset resolution, including "never"
//! - Rate-limit and generic failure handling
//! - Post-success state reset and the 5-tick cooldown

use std::sync::{Arc, Mutex};

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use linkchop::backend::BackendClient;
use linkchop::config::ClientConfig;
use linkchop::expiry::ExpirySelection;
use linkchop::hash::derive_code;
use linkchop::submit::{ChopForm, Notice, COOLDOWN_TICKS};

/// Requests captured by the mock backend, in arrival order
type Captured = Arc<Mutex<Vec<Value>>>;

#[derive(Clone)]
struct MockState {
    captured: Captured,
    reply: Value,
}

async fn rpc_handler(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.captured.lock().unwrap().push(body);
    Json(state.reply.clone())
}

/// Spawns a mock backend that records every RPC body and answers `reply`
async fn spawn_backend(reply: Value) -> (ClientConfig, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        captured: captured.clone(),
        reply,
    };

    let app = Router::new()
        .route("/chop_link_with_limit", post(rpc_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig {
        backend_base: format!("http://{}", addr),
        function: "chop_link_with_limit".to_string(),
        edge_base: "http://localhost:8080".to_string(),
    };

    (config, captured)
}

fn setup_form(config: &ClientConfig) -> ChopForm {
    ChopForm::new(BackendClient::new(config))
}

#[tokio::test]
async fn test_submit_sends_hash_and_one_hour_expiry() {
    let (config, captured) = spawn_backend(json!({ "data": "ok", "error": null })).await;
    let mut form = setup_form(&config);

    form.set_url("https://example.com");
    form.select_expiry(ExpirySelection::OneHour);

    let before = Utc::now();
    let notice = form.submit().await.unwrap();
    assert!(matches!(notice, Notice::Chopped { .. }));

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];

    assert_eq!(body["target_url"], "https://example.com");
    assert_eq!(body["url_hash"], derive_code("https://example.com"));

    // url_expiry is an RFC 3339 timestamp roughly one hour ahead
    let expiry: DateTime<Utc> = body["url_expiry"]
        .as_str()
        .unwrap()
        .parse()
        .expect("url_expiry should be RFC 3339");
    let expected = before + Duration::hours(1);
    assert!((expiry - expected).num_seconds().abs() < 5);
}

#[tokio::test]
async fn test_submit_never_sends_null_expiry() {
    let (config, captured) = spawn_backend(json!({ "data": "ok", "error": null })).await;
    let mut form = setup_form(&config);

    form.set_url("https://example.com/page");
    form.select_expiry(ExpirySelection::Never);

    let notice = form.submit().await.unwrap();
    assert!(matches!(notice, Notice::Chopped { .. }));

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0]["url_expiry"].is_null());
}

#[tokio::test]
async fn test_custom_expiry_is_sent_verbatim() {
    let (config, captured) = spawn_backend(json!({ "data": "ok", "error": null })).await;
    let mut form = setup_form(&config);

    let picked: DateTime<Utc> = "2027-01-15T08:30:00Z".parse().unwrap();
    form.set_url("https://example.com/custom");
    form.select_expiry(ExpirySelection::Custom(picked));

    let notice = form.submit().await.unwrap();
    match notice {
        Notice::Chopped { short_link } => {
            assert_eq!(short_link.expiry, Some(picked));
            assert_eq!(
                short_link.short_url(&config.edge_base),
                format!("http://localhost:8080/{}", short_link.code)
            );
        }
        other => panic!("expected success, got {:?}", other),
    }

    // The user-picked timestamp goes over the wire unchanged
    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["url_expiry"], picked.to_rfc3339());
}

#[tokio::test]
async fn test_success_resets_form_and_starts_cooldown() {
    let (config, _captured) = spawn_backend(json!({ "data": "ok", "error": null })).await;
    let mut form = setup_form(&config);

    form.set_url("https://example.com");
    form.select_expiry(ExpirySelection::TwelveHours);

    let notice = form.submit().await.unwrap();
    match notice {
        Notice::Chopped { short_link } => {
            assert_eq!(short_link.code, derive_code("https://example.com"));
            assert!(short_link.expiry.is_some());
        }
        other => panic!("expected success, got {:?}", other),
    }

    // Input cleared, expiry back to the default preset, cooldown armed
    assert_eq!(form.url_input, "");
    assert_eq!(form.expiry, ExpirySelection::OneHour);
    assert_eq!(form.cooldown_remaining(), COOLDOWN_TICKS);
    assert!(!form.can_submit());

    // Submitting while cooling down does nothing
    assert!(form.submit().await.is_none());

    // Five ticks later the control is enabled again
    for expected in (0..COOLDOWN_TICKS).rev() {
        form.tick();
        assert_eq!(form.cooldown_remaining(), expected);
    }
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_rate_limit_preserves_input() {
    let reply = json!({
        "data": null,
        "error": { "message": "Rate limit exceeded, try later" }
    });
    let (config, _captured) = spawn_backend(reply).await;
    let mut form = setup_form(&config);

    form.set_url("https://example.com/throttled");
    form.select_expiry(ExpirySelection::SixHours);

    let notice = form.submit().await.unwrap();
    assert_eq!(notice, Notice::RateLimited);

    // Local state untouched so the user can retry after the backend cooldown
    assert_eq!(form.url_input, "https://example.com/throttled");
    assert_eq!(form.expiry, ExpirySelection::SixHours);
    assert_eq!(form.cooldown_remaining(), 0);
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_generic_backend_error_preserves_input() {
    let reply = json!({
        "data": null,
        "error": { "message": "duplicate key value violates unique constraint" }
    });
    let (config, _captured) = spawn_backend(reply).await;
    let mut form = setup_form(&config);

    form.set_url("https://example.com/broken");
    let notice = form.submit().await.unwrap();

    assert_eq!(notice, Notice::Failed);
    assert_eq!(form.url_input, "https://example.com/broken");
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_invalid_url_never_reaches_the_backend() {
    let (config, captured) = spawn_backend(json!({ "data": "ok", "error": null })).await;
    let mut form = setup_form(&config);

    for bad in ["ftp://x.com", "not a url", ""] {
        form.set_url(bad);
        let notice = form.submit().await.unwrap();
        assert_eq!(notice, Notice::InvalidUrl);
        assert_eq!(form.url_input, bad);
    }

    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_generic_failure() {
    // Nothing listens on the discard port
    let config = ClientConfig {
        backend_base: "http://127.0.0.1:9".to_string(),
        function: "chop_link_with_limit".to_string(),
        edge_base: "http://localhost:8080".to_string(),
    };
    let mut form = setup_form(&config);

    form.set_url("https://example.com");
    let notice = form.submit().await.unwrap();

    assert_eq!(notice, Notice::Failed);
    assert_eq!(form.url_input, "https://example.com");
    assert!(form.can_submit());
}
