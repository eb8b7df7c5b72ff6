//! Process-local fallback set for revoked tokens
//!
//! Owned by the [`super::RevocationService`] instance; initialized empty at
//! startup and never persisted. Insertion time is recorded per token so the
//! periodic sweep can apply the retention cutoff.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory revoked token set used while the primary store is unreachable
#[derive(Debug, Default)]
pub struct RevokedFallback {
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl RevokedFallback {
    /// Create an empty fallback set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a revoked token
    pub fn insert(&self, token: &str) {
        self.guard().insert(token.to_string(), Utc::now());
    }

    /// Check membership
    pub fn contains(&self, token: &str) -> bool {
        self.guard().contains_key(token)
    }

    /// Evict tokens revoked before `cutoff`; returns the eviction count
    pub fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut tokens = self.guard();
        let before = tokens.len();
        tokens.retain(|_, revoked_at| *revoked_at >= cutoff);
        before - tokens.len()
    }

    /// Number of tokens currently held
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        // A panic elsewhere cannot leave the map half-written; recover
        // rather than poisoning every later request.
        self.tokens.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let fallback = RevokedFallback::new();

        assert!(!fallback.contains("tok-1"));
        fallback.insert("tok-1");
        assert!(fallback.contains("tok-1"));
        assert_eq!(fallback.len(), 1);
    }

    #[test]
    fn test_eviction_by_age() {
        let fallback = RevokedFallback::new();
        fallback.insert("old");
        fallback.insert("new");

        // Cutoff in the past evicts nothing
        let evicted = fallback.evict_older_than(Utc::now() - chrono::Duration::hours(1));
        assert_eq!(evicted, 0);
        assert_eq!(fallback.len(), 2);

        // Cutoff in the future evicts everything
        let evicted = fallback.evict_older_than(Utc::now() + chrono::Duration::hours(1));
        assert_eq!(evicted, 2);
        assert!(fallback.is_empty());
    }
}
