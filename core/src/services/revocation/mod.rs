//! Token revocation store
//!
//! Records JWT strings invalidated by logout and answers revocation
//! queries from the authentication middleware. Revocation is best-effort
//! defense-in-depth: the primary store is preferred, a process-local set
//! catches writes during outages, and membership queries fail open so an
//! unreachable store never blocks authentication.

mod config;
mod fallback;
mod service;

#[cfg(test)]
mod tests;

pub use config::RevocationConfig;
pub use fallback::RevokedFallback;
pub use service::RevocationService;
