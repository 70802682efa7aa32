//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the front door.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the front-door service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Backend services, in registration order.
    pub services: Vec<ServiceConfig>,

    /// Runtime mode. Development mode disables authentication entirely.
    pub mode: RuntimeMode,

    /// Access policy settings.
    pub auth: AuthConfig,

    /// Aggregate health probe settings.
    pub health_check: HealthCheckConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Targets of the fixed video routes.
    pub proxy: ProxyRoutesConfig,

    /// Sentinel supervisor settings.
    pub sentinel: SentinelConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// A logical backend service and its base address.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Unique logical name (e.g., "curator").
    pub name: String,

    /// Base URL (e.g., "http://localhost:5061").
    pub url: String,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The four co-located services with their local default ports.
pub fn default_services() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig::new("gateway", "http://localhost:5055"),
        ServiceConfig::new("curator", "http://localhost:5061"),
        ServiceConfig::new("monetizer", "http://localhost:5060"),
        ServiceConfig::new("public", "http://localhost:5062"),
    ]
}

/// Process runtime mode.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
}

impl RuntimeMode {
    /// Interpret a `NODE_ENV`-style value.
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            RuntimeMode::Development
        } else {
            RuntimeMode::Production
        }
    }

    pub fn is_development(self) -> bool {
        self == RuntimeMode::Development
    }
}

/// Access policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Exact paths served without a credential.
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            public_paths: vec!["/health".to_string()],
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Path appended to each service base address.
    pub path: String,

    /// Per-service probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (time to produce response headers) in seconds.
    pub request_secs: u64,

    /// Time allowed for an upstream to answer a forwarded request, in milliseconds.
    pub upstream_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_ms: 10_000,
        }
    }
}

/// Upstream targets of the fixed video routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyRoutesConfig {
    /// Service answering `GET /api/videos`.
    pub videos_service: String,

    /// Upstream path of the video listing.
    pub videos_path: String,

    /// Service answering `GET /api/videos/stream/{id}`.
    pub stream_service: String,

    /// Upstream path prefix of the stream route; the id is appended.
    pub stream_path: String,
}

impl Default for ProxyRoutesConfig {
    fn default() -> Self {
        Self {
            videos_service: "curator".to_string(),
            videos_path: "/videos".to_string(),
            stream_service: "public".to_string(),
            stream_path: "/stream".to_string(),
        }
    }
}

/// Sentinel supervisor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Start the supervisor with the server.
    pub enabled: bool,

    /// Tick interval in seconds.
    pub interval_secs: u64,

    /// Internal blocks checked on every tick.
    pub blocks: Vec<String>,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
            blocks: ["auth", "videos", "database", "storage"]
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            services: default_services(),
            mode: RuntimeMode::default(),
            auth: AuthConfig::default(),
            health_check: HealthCheckConfig::default(),
            timeouts: TimeoutConfig::default(),
            proxy: ProxyRoutesConfig::default(),
            sentinel: SentinelConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
