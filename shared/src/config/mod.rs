//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT, OTP, and revocation configuration
//! - `cache` - Redis connection configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod environment;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use environment::{Environment, LoggingConfig};
