//! Configuration for the edge router and the chop client
//!
//! All knobs are read from the environment (optionally via a .env file loaded
//! in main). The reserved-prefix exclusion list is configuration, not router
//! logic: it is parsed once at startup and validated before the server binds.

use std::env;

/// How a candidate short-code request is forwarded to the resolver
///
/// Redirect modes change the URL visible in the client's address bar;
/// `Rewrite` proxies the request transparently so the original host stays
/// visible. Exactly one mode is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    /// 302 Found redirect to the resolver (the default)
    Redirect302,
    /// 307 Temporary Redirect to the resolver
    Redirect307,
    /// Transparent reverse-proxy to the resolver; address bar unchanged
    Rewrite,
}

impl ForwardMode {
    /// Parses the `FORWARD_MODE` value; unknown values fall back to the default
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "307" | "redirect307" => ForwardMode::Redirect307,
            "rewrite" => ForwardMode::Rewrite,
            _ => ForwardMode::Redirect302,
        }
    }
}

/// Edge router configuration
///
/// # Environment Variables
///
/// - `RESOLVER_BASE` - Base URL of the backend resolution endpoint
///   (default: "http://localhost:9000/chop-redirector")
/// - `RESERVED_PREFIXES` - Comma-separated path prefixes that are never
///   treated as short codes (default: "/api,/assets")
/// - `FORWARD_MODE` - "302", "307" or "rewrite" (default: "302")
/// - `PORT` - Server port number (default: 8080)
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Base URL the extracted code is appended to, without trailing slash
    pub resolver_base: String,

    /// Ordered list of reserved path prefixes, each starting with '/'
    pub reserved_prefixes: Vec<String>,

    /// Forwarding behavior for candidate paths
    pub forward_mode: ForwardMode,

    /// Port the edge router binds to
    pub port: u16,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            resolver_base: "http://localhost:9000/chop-redirector".to_string(),
            reserved_prefixes: vec!["/api".to_string(), "/assets".to_string()],
            forward_mode: ForwardMode::Redirect302,
            port: 8080,
        }
    }
}

impl RouterConfig {
    /// Loads the router configuration from the environment
    ///
    /// Missing variables take their defaults. A malformed reserved-prefix
    /// list (an entry not starting with '/') is rejected so the router never
    /// runs with a silently ignored exclusion.
    pub fn from_env() -> Result<Self, String> {
        let defaults = RouterConfig::default();

        let resolver_base = env::var("RESOLVER_BASE")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.resolver_base);

        let reserved_prefixes = match env::var("RESERVED_PREFIXES") {
            Ok(raw) => parse_reserved_prefixes(&raw)?,
            Err(_) => defaults.reserved_prefixes,
        };

        let forward_mode = env::var("FORWARD_MODE")
            .map(|s| ForwardMode::from_env_value(&s))
            .unwrap_or(defaults.forward_mode);

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Ok(RouterConfig {
            resolver_base,
            reserved_prefixes,
            forward_mode,
            port,
        })
    }
}

/// Splits a comma-separated prefix list and validates every entry
///
/// Empty entries are skipped; each kept entry must start with '/'.
fn parse_reserved_prefixes(raw: &str) -> Result<Vec<String>, String> {
    let mut prefixes = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if !entry.starts_with('/') {
            return Err(format!(
                "invalid reserved prefix {:?}: must start with '/'",
                entry
            ));
        }
        prefixes.push(entry.to_string());
    }
    Ok(prefixes)
}

/// Chop client configuration
///
/// # Environment Variables
///
/// - `BACKEND_BASE` - Base URL of the backend RPC endpoint
///   (default: "http://localhost:9000")
/// - `BACKEND_FUNCTION` - RPC function name (default: "chop_link_with_limit")
/// - `EDGE_BASE` - Public base URL short links are displayed under
///   (default: "http://localhost:8080")
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the persistence backend, without trailing slash
    pub backend_base: String,

    /// Name of the remote procedure invoked on submission
    pub function: String,

    /// Public base the edge router serves short links from
    pub edge_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend_base: "http://localhost:9000".to_string(),
            function: "chop_link_with_limit".to_string(),
            edge_base: "http://localhost:8080".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads the client configuration from the environment
    pub fn from_env() -> Self {
        let defaults = ClientConfig::default();
        ClientConfig {
            backend_base: env::var("BACKEND_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_base),
            function: env::var("BACKEND_FUNCTION").unwrap_or(defaults.function),
            edge_base: env::var("EDGE_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.edge_base),
        }
    }

    /// Full URL of the RPC endpoint
    pub fn rpc_url(&self) -> String {
        format!("{}/{}", self.backend_base, self.function)
    }
}
