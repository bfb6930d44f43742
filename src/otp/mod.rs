//! One-time password primitives: Base32 secret decoding and the TOTP engine.
//!
//! Everything here is a pure function of its inputs. The only time source is
//! the [`Clock`] passed in by the caller.

pub mod base32;
pub mod clock;
pub mod totp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use totp::{Window, hotp, last_otp, next_otp, otp};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("invalid base32 character {character:?} at position {position}")]
    InvalidEncoding { character: char, position: usize },
    #[error("hmac key rejected")]
    Hmac,
}
