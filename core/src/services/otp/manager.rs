//! OTP manager implementation

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::OtpEntry;
use crate::errors::StoreError;
use crate::store::KeyValueStore;

use super::code::generate_code;
use super::config::OtpConfig;
use super::fallback::OtpFallback;

/// Issues and verifies one-time codes bound to a user and a per-issuance
/// correlation token.
///
/// A user key holds at most one live entry; issuing a new code overwrites
/// the previous one. The primary store is tried first for both operations;
/// any store failure degrades to the process-local fallback map, and
/// neither operation ever surfaces an error to the caller.
pub struct OtpManager<S: KeyValueStore> {
    primary: Option<Arc<S>>,
    fallback: Arc<OtpFallback>,
    config: OtpConfig,
}

impl<S: KeyValueStore> OtpManager<S> {
    /// Create a new OTP manager
    ///
    /// `primary` is `None` when the deployment runs without a shared store;
    /// entries then live only in the process-local fallback map.
    pub fn new(primary: Option<Arc<S>>, config: OtpConfig) -> Self {
        Self {
            primary,
            fallback: Arc::new(OtpFallback::new()),
            config,
        }
    }

    /// Handle to the fallback map, for the periodic cleanup sweep
    pub fn fallback(&self) -> Arc<OtpFallback> {
        Arc::clone(&self.fallback)
    }

    /// Issue a one-time code for a user, valid for `ttl`
    ///
    /// The generated code is returned to the caller (for the email sender)
    /// regardless of which backend accepted the entry.
    pub async fn generate(&self, user_id: Uuid, correlation_token: &str, ttl: Duration) -> String {
        let code = generate_code();
        let entry = OtpEntry::new(correlation_token, code.clone(), ttl);
        let key = self.entry_key(user_id);

        match &self.primary {
            Some(store) => match self.store_in_primary(store, &key, &entry, ttl).await {
                Ok(()) => {
                    // Drop any stale fallback entry so a replaced code
                    // cannot resurface from the fallback during a later
                    // outage.
                    self.fallback.remove(&key);
                    info!(
                        user_id = %user_id,
                        backend = "primary",
                        event = "otp_issued",
                        "Stored one-time code"
                    );
                }
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        error = %e,
                        event = "otp_store_fallback",
                        "Primary store rejected one-time code, using fallback map"
                    );
                    self.fallback.insert(&key, entry);
                }
            },
            None => {
                self.fallback.insert(&key, entry);
                info!(
                    user_id = %user_id,
                    backend = "memory",
                    event = "otp_issued",
                    "Stored one-time code in fallback map (no primary store configured)"
                );
            }
        }

        code
    }

    /// Issue a code with the configured default validity window
    pub async fn generate_with_default_ttl(&self, user_id: Uuid, correlation_token: &str) -> String {
        self.generate(user_id, correlation_token, self.config.default_ttl)
            .await
    }

    /// Verify a submitted code
    ///
    /// True only if an entry exists for the user, the correlation token
    /// matches, the entry has not expired, and the code matches. The caller
    /// is never told which check failed. Verification does not consume the
    /// entry; repeated attempts within the validity window are allowed.
    pub async fn verify(&self, user_id: Uuid, correlation_token: &str, submitted_code: &str) -> bool {
        let key = self.entry_key(user_id);

        let store = match &self.primary {
            Some(store) => store,
            None => return self.fallback.verify(&key, correlation_token, submitted_code),
        };

        match self.verify_in_primary(store, &key, correlation_token, submitted_code).await {
            Ok(verified) => verified,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    event = "otp_verify_fallback",
                    "Primary store unavailable during verification, using fallback map"
                );
                self.fallback.verify(&key, correlation_token, submitted_code)
            }
        }
    }

    fn entry_key(&self, user_id: Uuid) -> String {
        format!("{}:{}", self.config.key_prefix, user_id)
    }

    /// Probe the store, then write the entry and its expiry
    async fn store_in_primary(
        &self,
        store: &S,
        key: &str,
        entry: &OtpEntry,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        store.ping().await?;
        store.hash_set(key, &entry.to_fields()).await?;
        store.expire(key, ttl).await?;
        Ok(())
    }

    /// Probe the store, read the entry, and run the full check.
    ///
    /// An absent key and any mismatch are plain `false`. A stored entry
    /// that no longer decodes fails closed and is logged as a
    /// data-integrity warning - unlike store unavailability, which the
    /// caller handles by falling back.
    async fn verify_in_primary(
        &self,
        store: &S,
        key: &str,
        correlation_token: &str,
        submitted_code: &str,
    ) -> Result<bool, StoreError> {
        store.ping().await?;

        let fields = store.hash_get_all(key).await?;
        if fields.is_empty() {
            debug!(key, "No one-time code on record");
            return Ok(false);
        }

        match OtpEntry::from_fields(&fields) {
            Ok(entry) => Ok(entry.matches(correlation_token, submitted_code, Utc::now())),
            Err(e) => {
                warn!(
                    key,
                    error = %e,
                    event = "otp_entry_corrupt",
                    "Stored one-time code entry is malformed, rejecting verification"
                );
                Ok(false)
            }
        }
    }
}
