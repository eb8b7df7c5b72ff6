//! Periodic sweep over the in-process fallback stores
//!
//! One background task scans both fallback stores on an interval and
//! evicts expired OTP entries and revoked tokens past their retention,
//! instead of spawning a task per entry. Entries a verify touches first
//! are evicted passively before the sweep reaches them.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::otp::OtpFallback;
use super::revocation::RevokedFallback;

/// Configuration for the fallback cleanup sweep
#[derive(Debug, Clone)]
pub struct FallbackCleanupConfig {
    /// How often to run the sweep
    pub interval: Duration,

    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for FallbackCleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            enabled: true,
        }
    }
}

/// Result of a single sweep
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupResult {
    /// Expired OTP entries evicted
    pub otp_entries_evicted: usize,

    /// Revoked tokens evicted by the retention cutoff
    pub revoked_tokens_evicted: usize,
}

impl CleanupResult {
    /// Total number of evicted entries
    pub fn total_evicted(&self) -> usize {
        self.otp_entries_evicted + self.revoked_tokens_evicted
    }
}

/// Sweeps the fallback stores owned by the OTP manager and the revocation
/// service.
pub struct FallbackCleanupService {
    otp: Arc<OtpFallback>,
    revoked: Arc<RevokedFallback>,
    revocation_retention: Option<Duration>,
    config: FallbackCleanupConfig,
}

impl FallbackCleanupService {
    /// Create a new cleanup service over the given fallback stores
    ///
    /// `revocation_retention` of `None` leaves revoked tokens in place for
    /// the lifetime of the process.
    pub fn new(
        otp: Arc<OtpFallback>,
        revoked: Arc<RevokedFallback>,
        revocation_retention: Option<Duration>,
        config: FallbackCleanupConfig,
    ) -> Self {
        Self {
            otp,
            revoked,
            revocation_retention,
            config,
        }
    }

    /// Run a single sweep over both fallback stores
    pub fn run_cleanup(&self) -> CleanupResult {
        let now = Utc::now();

        let otp_entries_evicted = self.otp.evict_expired(now);

        let revoked_tokens_evicted = self
            .revocation_retention
            .and_then(|retention| chrono::Duration::from_std(retention).ok())
            .map(|retention| self.revoked.evict_older_than(now - retention))
            .unwrap_or(0);

        let result = CleanupResult {
            otp_entries_evicted,
            revoked_tokens_evicted,
        };

        if result.total_evicted() > 0 {
            debug!(
                otp_entries = result.otp_entries_evicted,
                revoked_tokens = result.revoked_tokens_evicted,
                "Evicted expired fallback entries"
            );
        }

        result
    }

    /// Start the sweep as a detached background task
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Fallback cleanup sweep is disabled");
            return;
        }

        let interval = self.config.interval;

        tokio::spawn(async move {
            info!(
                interval_seconds = interval.as_secs(),
                "Fallback cleanup sweep started"
            );

            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so a fresh process
            // does not sweep empty maps
            ticker.tick().await;

            loop {
                ticker.tick().await;
                self.run_cleanup();
            }
        });
    }
}
