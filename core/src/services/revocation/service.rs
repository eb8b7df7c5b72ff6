//! Token revocation service implementation

use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::StoreError;
use crate::store::KeyValueStore;

use super::config::RevocationConfig;
use super::fallback::RevokedFallback;

/// Records tokens that must no longer authenticate and answers revocation
/// queries.
///
/// Both operations are infallible from the caller's perspective:
/// - `revoke` retries the primary store a bounded number of times, then
///   records the token in the process-local fallback set and reports
///   success. Revocation is defense-in-depth, not the sole authorization
///   gate; signature and expiry checks still apply upstream.
/// - `is_revoked` consults the fallback set first (so outage-time
///   revocations hold within the process), then the primary store, and
///   fails open when the store is unreachable.
pub struct RevocationService<S: KeyValueStore> {
    primary: Option<Arc<S>>,
    fallback: Arc<RevokedFallback>,
    config: RevocationConfig,
}

impl<S: KeyValueStore> RevocationService<S> {
    /// Create a new revocation service
    ///
    /// `primary` is `None` when the deployment runs without a shared store;
    /// all state then lives in the process-local fallback set.
    pub fn new(primary: Option<Arc<S>>, config: RevocationConfig) -> Self {
        Self {
            primary,
            fallback: Arc::new(RevokedFallback::new()),
            config,
        }
    }

    /// Handle to the fallback set, for the periodic cleanup sweep
    pub fn fallback(&self) -> Arc<RevokedFallback> {
        Arc::clone(&self.fallback)
    }

    /// Mark a token as revoked
    ///
    /// Never fails: a primary-store outage downgrades to the fallback set
    /// with a warning.
    pub async fn revoke(&self, token: &str) {
        let store = match &self.primary {
            Some(store) => store,
            None => {
                self.fallback.insert(token);
                debug!(
                    token = %mask_token(token),
                    backend = "memory",
                    event = "token_revoked",
                    "Recorded revoked token in fallback set (no primary store configured)"
                );
                return;
            }
        };

        match self.revoke_in_primary(store, token).await {
            Ok(()) => {
                if let Some(retention) = self.config.max_retention {
                    // Best-effort retention refresh; a failure here only
                    // delays eviction, it does not lose the revocation.
                    if let Err(e) = store.expire(&self.config.set_key, retention).await {
                        debug!(
                            error = %e,
                            "Failed to refresh retention on revoked token set"
                        );
                    }
                }

                debug!(
                    token = %mask_token(token),
                    backend = "primary",
                    event = "token_revoked",
                    "Token added to revoked set"
                );
            }
            Err(e) => {
                warn!(
                    token = %mask_token(token),
                    error = %e,
                    event = "revocation_fallback",
                    "Could not persist revocation to primary store, using fallback set"
                );
                self.fallback.insert(token);
            }
        }
    }

    /// Check whether a token has been revoked
    ///
    /// Fails open: if the primary store is unreachable, tokens unknown to
    /// the fallback set are treated as not revoked so authentication stays
    /// available. The accepted risk window is bounded by the token TTL.
    pub async fn is_revoked(&self, token: &str) -> bool {
        if self.fallback.contains(token) {
            return true;
        }

        let store = match &self.primary {
            Some(store) => store,
            None => return false,
        };

        if let Err(e) = store.ping().await {
            warn!(
                error = %e,
                event = "revocation_check_degraded",
                "Primary store liveness probe failed, treating token as not revoked"
            );
            return false;
        }

        match store.set_contains(&self.config.set_key, token).await {
            Ok(revoked) => revoked,
            Err(e) => {
                warn!(
                    error = %e,
                    event = "revocation_check_degraded",
                    "Revocation lookup failed, treating token as not revoked"
                );
                false
            }
        }
    }

    /// Probe the store, then add the token with bounded fixed-backoff
    /// retries.
    async fn revoke_in_primary(&self, store: &S, token: &str) -> Result<(), StoreError> {
        store.ping().await?;

        let mut attempt = 1;
        loop {
            match store.set_add(&self.config.set_key, token).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.retry_attempts => {
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.config.retry_attempts,
                        "Failed to add token to revoked set, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Mask a token for logging; raw tokens never reach the logs
fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", &token[..8])
    }
}
