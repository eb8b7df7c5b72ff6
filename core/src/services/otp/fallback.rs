//! Process-local fallback map for OTP entries
//!
//! Owned by the [`super::OtpManager`] instance; initialized empty at
//! startup and never persisted. Expired entries are evicted passively when
//! a verify touches them and in bulk by the periodic cleanup sweep.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::OtpEntry;

/// In-memory OTP entries used while the primary store is unreachable
#[derive(Debug, Default)]
pub struct OtpFallback {
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl OtpFallback {
    /// Create an empty fallback map
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry, replacing any previous entry for the key
    pub fn insert(&self, key: &str, entry: OtpEntry) {
        self.guard().insert(key.to_string(), entry);
    }

    /// Drop the entry for a key, if present
    pub fn remove(&self, key: &str) {
        self.guard().remove(key);
    }

    /// Verify a submitted code against the stored entry.
    ///
    /// An expired entry is evicted on the spot and verification fails; the
    /// periodic sweep handles entries no verify ever touches.
    pub fn verify(&self, key: &str, token: &str, code: &str) -> bool {
        let now = Utc::now();
        let mut entries = self.guard();

        let entry = match entries.get(key) {
            Some(entry) => entry,
            None => return false,
        };

        if entry.is_expired_at(now) {
            entries.remove(key);
            return false;
        }

        entry.matches(token, code, now)
    }

    /// Evict all entries expired as of `now`; returns the eviction count
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.guard();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<String, OtpEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
