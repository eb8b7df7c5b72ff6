//! Configuration for the token revocation store

use std::time::Duration;

/// Configuration for [`super::RevocationService`]
#[derive(Debug, Clone)]
pub struct RevocationConfig {
    /// Set key holding revoked tokens in the primary store
    pub set_key: String,

    /// Write attempts against the primary store before falling back
    pub retry_attempts: u32,

    /// Fixed delay between write attempts
    pub retry_delay: Duration,

    /// Retention applied to revoked entries so the set does not grow
    /// unboundedly. Applied as a store-level TTL on the set in the primary
    /// and as an age cutoff during fallback sweeps. `None` disables it.
    pub max_retention: Option<Duration>,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            set_key: String::from("revoked_tokens"),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
            max_retention: Some(Duration::from_secs(24 * 3600)),
        }
    }
}

impl RevocationConfig {
    /// Configuration suited to unit tests: no inter-attempt delay
    pub fn fast() -> Self {
        Self {
            retry_delay: Duration::from_millis(0),
            ..Default::default()
        }
    }
}
