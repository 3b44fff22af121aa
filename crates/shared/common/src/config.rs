//! Shared configuration structures.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deployment environment, selects the logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// Human-readable logs at debug level
    #[default]
    Local,
    /// JSON logs at debug level
    Dev,
    /// JSON logs at info level
    Prod,
}

impl Env {
    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Env::Local | Env::Dev => "debug",
            Env::Prod => "info",
        }
    }

    /// Whether logs should be emitted as JSON lines.
    pub fn json_logs(&self) -> bool {
        !matches!(self, Env::Local)
    }
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "prod" => Ok(Env::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Per-request deadline applied by the gRPC server, in seconds
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Get the full bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 44044,
            request_timeout_secs: 3600,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a statement waits on a locked database before failing, in
    /// milliseconds. Also bounds waiting for a pooled connection.
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./storage/sso.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            busy_timeout_ms: 5000,
        }
    }
}
