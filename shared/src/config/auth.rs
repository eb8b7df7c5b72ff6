//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// Authentication configuration: JWT signing, OTP validity, and revoked
/// token retention.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT secret key for signing tokens (HS256)
    pub jwt_secret: String,

    /// Access token expiry time in minutes
    pub access_token_ttl_minutes: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// One-time code validity window in minutes
    pub otp_ttl_minutes: i64,

    /// How long revoked tokens are retained before the store may drop them,
    /// in hours. `None` keeps them until a store-level flush.
    #[serde(default)]
    pub revocation_retention_hours: Option<u64>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            access_token_ttl_minutes: 60,
            issuer: String::from("campus-portal"),
            otp_ttl_minutes: 10,
            revocation_retention_hours: Some(24),
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with the given secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let parse_i64 = |name: &str, default: i64| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        Self {
            jwt_secret: std::env::var("JWT_SECRET_KEY").unwrap_or(defaults.jwt_secret),
            access_token_ttl_minutes: parse_i64(
                "ACCESS_TOKEN_TTL_MINUTES",
                defaults.access_token_ttl_minutes,
            ),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            otp_ttl_minutes: parse_i64("OTP_TTL_MINUTES", defaults.otp_ttl_minutes),
            revocation_retention_hours: std::env::var("REVOKED_TOKEN_RETENTION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(defaults.revocation_retention_hours),
        }
    }

    /// Check if the default secret is still in place (deploy-time warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == "change-me-in-production"
    }

    /// OTP validity window as a `Duration`
    pub fn otp_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs((self.otp_ttl_minutes.max(0) as u64) * 60)
    }

    /// Revocation retention as a `Duration`, if bounded
    pub fn revocation_retention(&self) -> Option<std::time::Duration> {
        self.revocation_retention_hours
            .map(|h| std::time::Duration::from_secs(h * 3600))
    }
}
