use super::AuthError;
use crate::otp::{OtpError, base32};
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;

/// Immutable authorization settings, built once and shared by every request.
pub struct AuthConfig {
    expected_id: String,
    secret: Result<SecretSlice<u8>, OtpError>,
    override_code: Option<String>,
}

impl AuthConfig {
    /// Decode `encoded_secret` once and keep the key bytes.
    ///
    /// A secret that does not decode is kept as an error: the config stays
    /// usable and every authorization made with it is denied.
    #[must_use]
    pub fn new(expected_id: impl Into<String>, encoded_secret: &str) -> Self {
        Self {
            expected_id: expected_id.into(),
            secret: base32::decode(encoded_secret).map(SecretSlice::from),
            override_code: None,
        }
    }

    /// Static code accepted instead of real TOTP values. Empty means unset.
    #[must_use]
    pub fn with_override_code(mut self, code: Option<String>) -> Self {
        self.override_code = code.filter(|code| !code.is_empty());
        self
    }

    #[must_use]
    pub fn expected_id(&self) -> &str {
        &self.expected_id
    }

    /// Raw key bytes.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidEncoding`] if the configured secret did not decode.
    pub fn secret(&self) -> Result<&[u8], AuthError> {
        match &self.secret {
            Ok(secret) => Ok(secret.expose_secret()),
            Err(err) => Err(AuthError::from(err.clone())),
        }
    }

    #[must_use]
    pub fn override_code(&self) -> Option<&str> {
        self.override_code.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("expected_id", &self.expected_id)
            .field(
                "secret",
                &if self.secret.is_ok() { "***" } else { "<invalid>" },
            )
            .field("override_code", &self.override_code.as_ref().map(|_| "***"))
            .finish()
    }
}
