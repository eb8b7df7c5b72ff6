//! JWT token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::entities::Claims;
use crate::errors::TokenError;
use crate::services::revocation::RevocationService;
use crate::store::KeyValueStore;

use super::config::TokenConfig;

/// Issues and validates HS256 access tokens.
///
/// `authenticate` is the entry point the authentication middleware calls
/// on every request: cryptographic validation first, then the revocation
/// check. `revoke_token` is the logout path.
pub struct TokenService<S: KeyValueStore> {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    revocation: Arc<RevocationService<S>>,
}

impl<S: KeyValueStore> TokenService<S> {
    /// Create a new token service
    pub fn new(config: TokenConfig, revocation: Arc<RevocationService<S>>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            revocation,
        }
    }

    /// Issue a signed access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims::new_access_token(
            user_id,
            self.config.access_token_ttl_minutes,
            &self.config.issuer,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to sign access token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Validate signature, expiry, and issuer of a presented token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_nbf = true;
        // Exact expiry; the default 60s leeway would keep short-lived
        // tokens alive past their TTL.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }

    /// Full authentication check: cryptographic validation, then the
    /// revocation store.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify_access_token(token)?;

        if self.revocation.is_revoked(token).await {
            warn!(
                jti = %claims.jti,
                event = "revoked_token_presented",
                "Rejected revoked access token"
            );
            return Err(TokenError::TokenRevoked);
        }

        Ok(claims)
    }

    /// Invalidate a token on logout; never fails the caller
    pub async fn revoke_token(&self, token: &str) {
        self.revocation.revoke(token).await;
    }

    /// Handle to the underlying revocation service
    pub fn revocation(&self) -> &Arc<RevocationService<S>> {
        &self.revocation
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
            TokenError::InvalidClaims
        }
        _ => TokenError::InvalidTokenFormat,
    }
}
