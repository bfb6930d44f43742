//! RFC 4226 HOTP and RFC 6238 TOTP with HMAC-SHA1, 6 digits and a 30 second step.

use super::{Clock, OtpError};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

pub const STEP_SECONDS: i64 = 30;
pub const DIGITS: usize = 6;
const MODULUS: u32 = 1_000_000;

/// A 30 second window relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    Previous,
    Current,
    Next,
}

impl Window {
    /// Order in which windows are tried when verifying a code.
    pub const VERIFY_ORDER: [Self; 3] = [Self::Current, Self::Previous, Self::Next];

    #[must_use]
    pub const fn offset_seconds(self) -> i64 {
        match self {
            Self::Previous => -STEP_SECONDS,
            Self::Current => 0,
            Self::Next => STEP_SECONDS,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Current => "current",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step counter for `unix_seconds + offset_seconds`, rounded towards negative infinity.
#[must_use]
pub const fn counter(unix_seconds: i64, offset_seconds: i64) -> i64 {
    unix_seconds.saturating_add(offset_seconds).div_euclid(STEP_SECONDS)
}

/// HOTP code for `counter`, zero padded to six digits.
///
/// # Errors
/// Returns [`OtpError::Hmac`] if the MAC cannot be keyed.
pub fn hotp(secret: &[u8], counter: i64) -> Result<String, OtpError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret).map_err(|_| OtpError::Hmac)?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // dynamic truncation, offset is at most 15 so offset + 3 stays inside the 20 byte digest
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let truncated = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    Ok(format!("{:0width$}", truncated % MODULUS, width = DIGITS))
}

/// TOTP code for the given window at `unix_seconds`.
///
/// # Errors
/// Returns [`OtpError::Hmac`] if the MAC cannot be keyed.
pub fn code_at(secret: &[u8], unix_seconds: i64, window: Window) -> Result<String, OtpError> {
    hotp(secret, counter(unix_seconds, window.offset_seconds()))
}

/// Code for the current window.
///
/// # Errors
/// Returns [`OtpError::Hmac`] if the MAC cannot be keyed.
pub fn otp<C: Clock + ?Sized>(secret: &[u8], clock: &C) -> Result<String, OtpError> {
    code_at(secret, clock.now(), Window::Current)
}

/// Code for the window 30 seconds before the current one.
///
/// # Errors
/// Returns [`OtpError::Hmac`] if the MAC cannot be keyed.
pub fn last_otp<C: Clock + ?Sized>(secret: &[u8], clock: &C) -> Result<String, OtpError> {
    code_at(secret, clock.now(), Window::Previous)
}

/// Code for the window 30 seconds after the current one.
///
/// # Errors
/// Returns [`OtpError::Hmac`] if the MAC cannot be keyed.
pub fn next_otp<C: Clock + ?Sized>(secret: &[u8], clock: &C) -> Result<String, OtpError> {
    code_at(secret, clock.now(), Window::Next)
}
