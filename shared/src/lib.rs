//! Shared configuration and common types for the Campus Portal backend
//!
//! This crate provides the configuration layer used across all server
//! modules:
//! - Environment detection and logging setup
//! - Cache (Redis) connection configuration
//! - Authentication configuration (JWT, OTP, revocation retention)

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, CacheConfig, Environment, LoggingConfig};
