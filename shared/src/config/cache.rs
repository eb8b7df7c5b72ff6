//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
///
/// Covers the connection knobs the revocation and OTP stores need: URL and
/// credentials, pool sizing, and the connect/response timeouts that bound
/// every store call so an unreachable Redis cannot stall a request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Optional password, applied on top of the URL
    #[serde(default)]
    pub password: Option<String>,

    /// Maximum number of connections in the pool
    pub pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Per-operation response timeout in seconds
    pub response_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            password: None,
            pool_size: 10,
            connect_timeout: 10,
            response_timeout: 5,
            idle_timeout: 300,
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Returns `None` when REDIS_URL is unset: the deployment runs without a
    /// primary store and the services operate on their in-process fallbacks.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty())?;

        let parse_u64 = |name: &str, default: u64| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        let defaults = Self::default();
        Some(Self {
            url,
            password: std::env::var("REDIS_PASS").ok().filter(|p| !p.is_empty()),
            pool_size: std::env::var("REDIS_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.pool_size),
            connect_timeout: parse_u64("REDIS_CONNECT_TIMEOUT", defaults.connect_timeout),
            response_timeout: parse_u64("REDIS_RESPONSE_TIMEOUT", defaults.response_timeout),
            idle_timeout: parse_u64("REDIS_IDLE_TIMEOUT", defaults.idle_timeout),
            database: std::env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database),
        })
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Connection timeout as a `Duration`
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout)
    }

    /// Response timeout as a `Duration`
    pub fn response_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.response_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.database, 0);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.response_timeout().as_secs(), 5);
    }

    #[test]
    fn test_cache_config_builders() {
        let config = CacheConfig::new("redis://cache:6379")
            .with_database(20)
            .with_password("hunter2");

        // Database index is clamped to the Redis maximum
        assert_eq!(config.database, 15);
        assert_eq!(config.password.as_deref(), Some("hunter2"));
        assert_eq!(config.url, "redis://cache:6379");
    }
}
