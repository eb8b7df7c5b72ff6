//! Domain layer: entities shared by the auth-session services

pub mod entities;

pub use entities::{Claims, OtpEntry, OtpEntryError, CODE_LENGTH};
