//! Edge router entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Validates the router configuration
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use linkchop::config::RouterConfig;
use linkchop::route::{create_app, AppState};

/// Edge router entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from .env file
/// 2. Parses and validates the router configuration
/// 3. Creates the application state and router
/// 4. Starts the HTTP server with graceful shutdown handling
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `RESOLVER_BASE` - Backend resolution endpoint base URL
/// - `RESERVED_PREFIXES` - Comma-separated passthrough prefixes
/// - `FORWARD_MODE` - "302", "307" or "rewrite"
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("linkchop=debug,tower_http=debug")
        .init();

    // Parse and validate the router configuration before binding
    let config = RouterConfig::from_env().expect("Invalid router configuration");
    let port = config.port;
    let resolver_base = config.resolver_base.clone();
    let forward_mode = config.forward_mode;

    // Create application state and the Axum router
    let state = AppState::new(config);
    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    // Print startup information
    println!("🚀 Edge router running at http://localhost:{}", port);
    println!("🔗 Forwarding short codes to {} ({:?})", resolver_base, forward_mode);

    // Start the server with graceful shutdown support
    // The server will continue running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received, letting
/// open connections complete before the process exits.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping edge router.");
}
