//! Auth-session services: token revocation, OTP management, JWT tokens,
//! and the periodic sweep over the in-process fallback stores.

pub mod cleanup;
pub mod otp;
pub mod revocation;
pub mod token;

pub use cleanup::{CleanupResult, FallbackCleanupConfig, FallbackCleanupService};
pub use otp::{generate_code, generate_correlation_token, OtpConfig, OtpFallback, OtpManager};
pub use revocation::{RevocationConfig, RevocationService, RevokedFallback};
pub use token::{TokenConfig, TokenService};
