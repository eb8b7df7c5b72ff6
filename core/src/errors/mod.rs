//! Error types for the auth-session core
//!
//! Two small taxonomies: `StoreError` for the backing key-value store
//! (every variant routes callers to the in-process fallback path) and
//! `TokenError` for JWT validation failures surfaced to the middleware.

use thiserror::Error;

/// Failures talking to the primary key-value store.
///
/// These are never surfaced to request handlers; each service has an
/// explicit policy that matches on the outcome and degrades to its local
/// fallback instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached (connection refused, probe failed,
    /// protocol-level failure).
    #[error("store unreachable: {0}")]
    Unreachable(String),

    /// The operation did not complete within its bounded timeout.
    #[error("store operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Token validation and management failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable error code for API-facing conversion
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
