//! Storage seam between the auth-session services and their backing store
//!
//! The revocation store and OTP manager are generic over [`KeyValueStore`]
//! so the Redis-backed implementation lives in the infrastructure layer and
//! tests run against the in-memory mock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::StoreError;

pub mod mock;

pub use mock::MockStore;

/// Minimal key-value store surface the auth-session core needs: set
/// membership for revoked tokens, multi-field hashes with expiry for OTP
/// entries, and a liveness probe consulted before each operation.
///
/// Implementations must bound every call with a timeout; a slow store
/// surfaces as [`StoreError::Timeout`] rather than stalling the request.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Lightweight liveness probe (e.g. PING)
    async fn ping(&self) -> Result<(), StoreError>;

    /// Add a member to a set
    async fn set_add(&self, set: &str, member: &str) -> Result<(), StoreError>;

    /// Check set membership
    async fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreError>;

    /// Write multiple fields of a hash, overwriting existing fields
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError>;

    /// Read all fields of a hash; an empty map means the key is absent
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// Set a time-to-live on a key
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Delete a key
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
