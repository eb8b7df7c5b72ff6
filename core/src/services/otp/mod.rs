//! One-time code management for two-factor login and password-reset flows
//!
//! Issues 6-digit codes bound to a user and a per-issuance correlation
//! token, and verifies submitted codes against the stored entry. State
//! lives in the primary key-value store with a process-local fallback map
//! for outages; both operations always complete.

mod code;
mod config;
mod fallback;
mod manager;

#[cfg(test)]
mod tests;

pub use code::{generate_code, generate_correlation_token, CORRELATION_TOKEN_LENGTH};
pub use config::OtpConfig;
pub use fallback::OtpFallback;
pub use manager::OtpManager;
