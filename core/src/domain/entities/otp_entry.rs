//! One-time code entry for two-factor login and password-reset flows.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Hash field holding the per-issuance correlation token
const FIELD_TOKEN: &str = "token";

/// Hash field holding the one-time code
const FIELD_CODE: &str = "code";

/// Hash field holding the RFC 3339 expiry timestamp
const FIELD_EXPIRES_AT: &str = "expires_at";

/// Errors decoding a stored entry back from its hash fields
///
/// Either variant means the stored data cannot be trusted; verification
/// fails closed and the error is logged as a data-integrity warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpEntryError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid expiry timestamp: {0}")]
    InvalidTimestamp(String),
}

/// A single live one-time code for a user.
///
/// At most one entry exists per user; issuing a new code overwrites the
/// previous entry wholesale. The correlation token is the per-issuance
/// secret that ties a submitted code to the flow that requested it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    /// Per-issuance correlation token
    pub token: String,

    /// The 6-digit one-time code
    pub code: String,

    /// Timestamp after which the entry no longer verifies
    pub expires_at: DateTime<Utc>,
}

impl OtpEntry {
    /// Creates an entry expiring `ttl` from now
    pub fn new(token: impl Into<String>, code: impl Into<String>, ttl: std::time::Duration) -> Self {
        // Out-of-range TTLs clamp to roughly a century; close enough to "never"
        let ttl = chrono::Duration::from_std(ttl)
            .unwrap_or_else(|_| chrono::Duration::days(36_500));
        Self {
            token: token.into(),
            code: code.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Whether the entry has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Full verification check: correlation token, expiry, then code.
    ///
    /// Code and token comparisons are constant-time. Callers get a single
    /// boolean; which check failed is deliberately not distinguished.
    pub fn matches(&self, token: &str, code: &str, now: DateTime<Utc>) -> bool {
        if !constant_time_eq(self.token.as_bytes(), token.as_bytes()) {
            return false;
        }
        if self.is_expired_at(now) {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), code.as_bytes())
    }

    /// Encode as hash fields for the key-value store
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            (FIELD_TOKEN.to_string(), self.token.clone()),
            (FIELD_CODE.to_string(), self.code.clone()),
            (FIELD_EXPIRES_AT.to_string(), self.expires_at.to_rfc3339()),
        ]
    }

    /// Decode from hash fields retrieved from the key-value store
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, OtpEntryError> {
        let token = fields
            .get(FIELD_TOKEN)
            .ok_or(OtpEntryError::MissingField(FIELD_TOKEN))?;
        let code = fields
            .get(FIELD_CODE)
            .ok_or(OtpEntryError::MissingField(FIELD_CODE))?;
        let raw_expires = fields
            .get(FIELD_EXPIRES_AT)
            .ok_or(OtpEntryError::MissingField(FIELD_EXPIRES_AT))?;

        let expires_at = DateTime::parse_from_rfc3339(raw_expires)
            .map_err(|_| OtpEntryError::InvalidTimestamp(raw_expires.clone()))?
            .with_timezone(&Utc);

        Ok(Self {
            token: token.clone(),
            code: code.clone(),
            expires_at,
        })
    }
}
