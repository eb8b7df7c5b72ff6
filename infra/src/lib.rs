//! # Infrastructure Layer
//!
//! Concrete implementations of the storage seam defined in `portal_core`.
//! Currently a single backend: Redis, reached over a multiplexed async
//! connection with bounded per-operation timeouts so a slow or unreachable
//! store degrades to the core's fallback paths instead of stalling
//! requests.

/// Cache module - Redis client and operations
pub mod cache;

pub use cache::RedisStore;
