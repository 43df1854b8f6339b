//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same structure can be read from a
//! TOML file. `Default` describes the two-backend demo topology.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Dispatcher listener.
    pub listener: ListenerConfig,

    /// Route definitions, matched in order.
    pub routes: Vec<RouteConfig>,

    /// Backend stub servers started next to the dispatcher.
    pub stubs: Vec<StubConfig>,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: vec![
                RouteConfig::new("svca", "/svca", "http://localhost:8888"),
                RouteConfig::new("svcb", "/svcb", "http://localhost:9999"),
            ],
            stubs: vec![
                StubConfig::new("[::]:8888"),
                StubConfig::new("[::]:9999"),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. `[::]` accepts IPv4 and IPv6 on dual-stack hosts.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "[::]:8080".to_string(),
        }
    }
}

/// Maps a path prefix to a single backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Path prefix to match, e.g. `/svca`.
    pub path_prefix: String,

    /// Backend base URL, e.g. `http://localhost:8888`.
    pub target: String,
}

impl RouteConfig {
    pub fn new(
        name: impl Into<String>,
        path_prefix: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path_prefix: path_prefix.into(),
            target: target.into(),
        }
    }
}

/// A backend stub listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StubConfig {
    /// Bind address (e.g., "[::]:8888").
    pub bind_address: String,
}

impl StubConfig {
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
