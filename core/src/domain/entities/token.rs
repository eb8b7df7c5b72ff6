//! JWT claims for portal access tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `ttl_minutes` - Access token lifetime in minutes
    /// * `issuer` - Issuer claim value
    pub fn new_access_token(user_id: Uuid, ttl_minutes: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(ttl_minutes);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, 60, "campus-portal");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, "campus-portal");
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, 60, "campus-portal");

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, 60, "campus-portal");

        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_claims_not_before() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access_token(user_id, 60, "campus-portal");

        claims.nbf = Utc::now().timestamp() + 3600;

        assert!(!claims.is_valid());
    }

    #[test]
    fn test_jti_uniqueness() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, 60, "campus-portal");
        let b = Claims::new_access_token(user_id, 60, "campus-portal");

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new_access_token(Uuid::new_v4(), 60, "campus-portal");

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
