//! Configuration for the JWT token service

use portal_shared::config::AuthConfig;

/// Configuration for [`super::TokenService`]
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Issuer claim, also enforced during validation
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for TokenConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            secret: auth.jwt_secret.clone(),
            access_token_ttl_minutes: auth.access_token_ttl_minutes,
            issuer: auth.issuer.clone(),
        }
    }
}
