//! # Campus Portal Core
//!
//! Core auth-session layer for the Campus Portal backend. This crate
//! contains the token revocation store, the OTP manager, the JWT token
//! service, and the storage seam they share. It is consumed in-process by
//! the authentication middleware and the login/2FA/password-reset handlers
//! of the surrounding service.

pub mod domain;
pub mod errors;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
pub use store::*;
