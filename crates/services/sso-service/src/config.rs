//! SSO service configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use common::{DatabaseConfig, Env, ServiceConfig};
use domain::{DomainResult, HashCost, DEFAULT_STORAGE_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_SECS};

use crate::service::AuthSettings;

/// SSO service configuration.
#[derive(Debug, Clone)]
pub struct SsoServiceConfig {
    /// Deployment environment (logging profile)
    pub env: Env,
    /// gRPC server settings
    pub service: ServiceConfig,
    /// Storage binding
    pub database: DatabaseConfig,
    /// Issued token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Deadline for each storage call in seconds
    pub storage_timeout_secs: u64,
    /// Password hashing work factor
    pub hash_cost: HashCost,
}

impl SsoServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset or unparseable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        override_with(&mut config.env, var("AUTH_SERVICE_ENV"));
        if let Some(host) = var("AUTH_SERVICE_HOST") {
            config.service.host = host;
        }
        override_with(&mut config.service.port, var("AUTH_SERVICE_PORT"));
        override_with(
            &mut config.service.request_timeout_secs,
            var("AUTH_SERVICE_GRPC_TIMEOUT_SECS"),
        );
        if let Some(url) = var("AUTH_SERVICE_DATABASE_URL").or_else(|| var("DATABASE_URL")) {
            config.database.url = url;
        }
        override_with(&mut config.token_ttl_secs, var("AUTH_SERVICE_TOKEN_TTL_SECS"));
        override_with(
            &mut config.storage_timeout_secs,
            var("AUTH_SERVICE_STORAGE_TIMEOUT_SECS"),
        );
        config.database.busy_timeout_ms = config.storage_timeout_secs.saturating_mul(1000);
        override_with(&mut config.hash_cost.memory_kib, var("AUTH_SERVICE_HASH_MEMORY_KIB"));
        override_with(&mut config.hash_cost.iterations, var("AUTH_SERVICE_HASH_ITERATIONS"));
        override_with(&mut config.hash_cost.parallelism, var("AUTH_SERVICE_HASH_PARALLELISM"));

        config
    }

    /// Reject settings that would only fail once requests arrive.
    ///
    /// # Errors
    /// Returns [`domain::DomainError::Hashing`] when Argon2 refuses the hash cost.
    pub fn validate(&self) -> DomainResult<()> {
        self.hash_cost.validate()
    }

    /// Settings handed to the authentication service.
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            token_ttl: Duration::from_secs(self.token_ttl_secs),
            storage_timeout: Duration::from_secs(self.storage_timeout_secs),
            hash_cost: self.hash_cost,
        }
    }

    /// Per-request deadline for the gRPC server.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.request_timeout_secs)
    }
}

/// Replace `slot` when `raw` parses.
fn override_with<T: FromStr>(slot: &mut T, raw: Option<String>) {
    if let Some(value) = raw.and_then(|v| v.parse().ok()) {
        *slot = value;
    }
}

impl Default for SsoServiceConfig {
    fn default() -> Self {
        Self {
            env: Env::default(),
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            storage_timeout_secs: DEFAULT_STORAGE_TIMEOUT_SECS,
            hash_cost: HashCost::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SsoServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SsoServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.env, Env::Local);
        assert_eq!(config.service.port, 44044);
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.hash_cost, HashCost::default());
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AUTH_SERVICE_ENV", "prod"),
            ("AUTH_SERVICE_PORT", "50051"),
            ("AUTH_SERVICE_TOKEN_TTL_SECS", "900"),
            ("AUTH_SERVICE_HASH_ITERATIONS", "3"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]);

        assert_eq!(config.env, Env::Prod);
        assert_eq!(config.service.port, 50051);
        assert_eq!(config.auth_settings().token_ttl, Duration::from_secs(900));
        assert_eq!(config.hash_cost.iterations, 3);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_service_specific_database_url_wins() {
        let config = config_from(&[
            ("AUTH_SERVICE_DATABASE_URL", "sqlite://./sso.db"),
            ("DATABASE_URL", "sqlite://./other.db"),
        ]);
        assert_eq!(config.database.url, "sqlite://./sso.db");
    }

    #[test]
    fn test_busy_timeout_follows_storage_deadline() {
        assert_eq!(config_from(&[]).database.busy_timeout_ms, 5000);

        let config = config_from(&[("AUTH_SERVICE_STORAGE_TIMEOUT_SECS", "2")]);
        assert_eq!(config.database.busy_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_unusable_hash_cost() {
        assert!(config_from(&[]).validate().is_ok());

        let config = config_from(&[("AUTH_SERVICE_HASH_MEMORY_KIB", "1")]);
        assert_eq!(config.hash_cost.memory_kib, 1);
        assert!(matches!(config.validate(), Err(DomainError::Hashing(_))));

        let config = config_from(&[("AUTH_SERVICE_HASH_PARALLELISM", "0")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[
            ("AUTH_SERVICE_PORT", "not-a-port"),
            ("AUTH_SERVICE_ENV", "staging"),
        ]);

        assert_eq!(config.service.port, 44044);
        assert_eq!(config.env, Env::Local);
    }
}
