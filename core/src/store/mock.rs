//! In-memory [`KeyValueStore`] used by tests and local development.
//!
//! The availability switch simulates a store outage: while flipped off,
//! every operation (including the liveness probe) fails with
//! [`StoreError::Unreachable`], which is exactly what routes the services
//! onto their fallback paths.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::errors::StoreError;
use crate::store::KeyValueStore;

/// In-memory mock store with an availability switch
#[derive(Default)]
pub struct MockStore {
    available: AtomicBool,
    sets: Mutex<HashMap<String, HashSet<String>>>,
    hashes: Mutex<HashMap<String, HashMap<String, String>>>,
    ttls: Mutex<HashMap<String, Duration>>,
}

impl MockStore {
    /// Create a reachable mock store
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            ..Default::default()
        }
    }

    /// Create a mock store that fails every operation
    pub fn unreachable() -> Self {
        Self {
            available: AtomicBool::new(false),
            ..Default::default()
        }
    }

    /// Flip store availability at runtime
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Last TTL applied to a key, if any
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        lock(&self.ttls).get(key).copied()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unreachable("mock store offline".to_string()))
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn set_add(&self, set: &str, member: &str) -> Result<(), StoreError> {
        self.check_available()?;
        lock(&self.sets)
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(lock(&self.sets)
            .get(set)
            .map(|members| members.contains(member))
            .unwrap_or(false))
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        self.check_available()?;
        let mut hashes = lock(&self.hashes);
        let hash = hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.check_available()?;
        Ok(lock(&self.hashes).get(key).cloned().unwrap_or_default())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        self.check_available()?;
        lock(&self.ttls).insert(key.to_string(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check_available()?;
        lock(&self.hashes).remove(key);
        lock(&self.sets).remove(key);
        lock(&self.ttls).remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_membership() {
        let store = MockStore::new();

        store.set_add("revoked", "tok-1").await.unwrap();
        assert!(store.set_contains("revoked", "tok-1").await.unwrap());
        assert!(!store.set_contains("revoked", "tok-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_roundtrip_and_expire() {
        let store = MockStore::new();
        let fields = vec![
            ("code".to_string(), "123456".to_string()),
            ("token".to_string(), "corr".to_string()),
        ];

        store.hash_set("otp:u1", &fields).await.unwrap();
        store
            .expire("otp:u1", Duration::from_secs(600))
            .await
            .unwrap();

        let read = store.hash_get_all("otp:u1").await.unwrap();
        assert_eq!(read.get("code").map(String::as_str), Some("123456"));
        assert_eq!(store.ttl_of("otp:u1"), Some(Duration::from_secs(600)));

        store.delete("otp:u1").await.unwrap();
        assert!(store.hash_get_all("otp:u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_everything() {
        let store = MockStore::unreachable();

        assert!(store.ping().await.is_err());
        assert!(store.set_add("s", "m").await.is_err());
        assert!(store.hash_get_all("k").await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
    }
}
