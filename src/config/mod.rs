// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway configuration
//!
//! Server, session and document-service settings, loaded from environment
//! variables (a `.env` file is honoured by the binary).

use std::env;
use std::time::Duration;

/// Configuration for the gateway process
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address the HTTP server binds (default: 0.0.0.0:8080)
    pub listen_addr: String,
    /// Idle timeout for sessions in seconds (default: 1800 = 30 minutes)
    pub session_ttl_secs: u64,
    /// Background sweep interval in seconds, 0 disables (default: 0)
    pub session_sweep_interval_secs: u64,
    /// Allowed CORS origins, `*` for any (default: ["*"])
    pub cors_allowed_origins: Vec<String>,
    /// Document service settings
    pub document_api: DocumentApiConfig,
}

/// Configuration for the outbound document-service client
#[derive(Debug, Clone)]
pub struct DocumentApiConfig {
    /// Endpoint URL; empty means no document service is configured
    pub url: String,
    /// HTTP basic auth username
    pub username: String,
    /// HTTP basic auth password
    pub password: String,
    /// Document type requested for every case (default: "national id")
    pub document_type: String,
    /// TCP connect timeout in milliseconds (default: 10000)
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds (default: 60000)
    pub read_timeout_ms: u64,
    /// Idle pooled connections kept per host (default: 10)
    pub max_connections_per_route: usize,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: env::var("API_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            session_ttl_secs: env_or("SESSION_TTL_SECS", defaults.session_ttl_secs),
            session_sweep_interval_secs: env_or(
                "SESSION_SWEEP_INTERVAL_SECS",
                defaults.session_sweep_interval_secs,
            ),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
            document_api: DocumentApiConfig::from_env(),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Sweep interval, `None` when the background sweep is disabled
    pub fn session_sweep_interval(&self) -> Option<Duration> {
        (self.session_sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.session_sweep_interval_secs))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("listen_addr is not a socket address: {}", self.listen_addr));
        }
        if self.session_ttl_secs == 0 {
            return Err("session_ttl_secs must be at least 1".to_string());
        }
        if self.cors_allowed_origins.is_empty() {
            return Err("cors_allowed_origins must not be empty".to_string());
        }
        self.document_api.validate()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            session_ttl_secs: 1800,
            session_sweep_interval_secs: 0,
            cors_allowed_origins: vec!["*".to_string()],
            document_api: DocumentApiConfig::default(),
        }
    }
}

impl DocumentApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("DOCUMENT_API_URL").unwrap_or(defaults.url),
            username: env::var("DOCUMENT_API_USERNAME").unwrap_or(defaults.username),
            password: env::var("DOCUMENT_API_PASSWORD").unwrap_or(defaults.password),
            document_type: env::var("DOCUMENT_API_DOCUMENT_TYPE")
                .unwrap_or(defaults.document_type),
            connect_timeout_ms: env_or(
                "DOCUMENT_API_CONNECT_TIMEOUT_MS",
                defaults.connect_timeout_ms,
            ),
            read_timeout_ms: env_or("DOCUMENT_API_READ_TIMEOUT_MS", defaults.read_timeout_ms),
            max_connections_per_route: env_or(
                "HTTP_CLIENT_MAX_CONNECTIONS_PER_ROUTE",
                defaults.max_connections_per_route,
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.connect_timeout_ms == 0 {
            return Err("connect_timeout_ms must be at least 1".to_string());
        }
        if self.read_timeout_ms == 0 {
            return Err("read_timeout_ms must be at least 1".to_string());
        }
        if self.max_connections_per_route == 0 {
            return Err("max_connections_per_route must be at least 1".to_string());
        }
        if self.is_configured() && reqwest::Url::parse(&self.url).is_err() {
            return Err(format!("document API url is invalid: {}", self.url));
        }
        Ok(())
    }
}

impl Default for DocumentApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
            document_type: "national id".to_string(),
            connect_timeout_ms: 10_000,
            read_timeout_ms: 60_000,
            max_connections_per_route: 10,
        }
    }
}
