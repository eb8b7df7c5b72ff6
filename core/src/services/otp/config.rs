//! Configuration for the OTP manager

use std::time::Duration;

/// Configuration for [`super::OtpManager`]
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Key prefix for OTP entries in the primary store
    pub key_prefix: String,

    /// Validity window applied when the caller does not pass one
    pub default_ttl: Duration,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            key_prefix: String::from("otp"),
            default_ttl: Duration::from_secs(10 * 60),
        }
    }
}
