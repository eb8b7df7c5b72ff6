//! Random generation of one-time codes and correlation tokens

use rand::{rngs::OsRng, Rng, RngCore};

use crate::domain::entities::otp_entry::CODE_LENGTH;

/// Length of a correlation token
pub const CORRELATION_TOKEN_LENGTH: usize = 32;

const ALPHANUMERIC_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random 6-digit one-time code
///
/// Each digit is drawn independently from the OS CSPRNG. If the CSPRNG is
/// unavailable the digit comes from the thread-local generator instead, so
/// the result is always exactly [`CODE_LENGTH`] ASCII digits.
pub fn generate_code() -> String {
    let mut code = String::with_capacity(CODE_LENGTH);
    for _ in 0..CODE_LENGTH {
        // Reducing a byte mod 10 carries a negligible bias for a 6-digit
        // code that also gets a short validity window.
        let digit = match secure_byte() {
            Some(byte) => byte % 10,
            None => rand::thread_rng().gen_range(0..10u8),
        };
        code.push(char::from(b'0' + digit));
    }
    code
}

/// Generate a 32-character alphanumeric correlation token
///
/// The token is the per-issuance secret that must accompany a submitted
/// code; it is handed to the client when the OTP flow starts.
pub fn generate_correlation_token() -> String {
    let mut bytes = [0u8; CORRELATION_TOKEN_LENGTH];
    if OsRng.try_fill_bytes(&mut bytes).is_err() {
        rand::thread_rng().fill_bytes(&mut bytes);
    }

    bytes
        .iter()
        .map(|b| ALPHANUMERIC_CHARSET[*b as usize % ALPHANUMERIC_CHARSET.len()] as char)
        .collect()
}

fn secure_byte() -> Option<u8> {
    let mut byte = [0u8; 1];
    OsRng.try_fill_bytes(&mut byte).ok()?;
    Some(byte[0])
}
