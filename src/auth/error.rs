use crate::otp::OtpError;
use std::fmt;
use thiserror::Error;

/// Which request-supplied credential a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Identity,
    Code,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Code => f.write_str("code"),
        }
    }
}

/// Why a credential header could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    Absent,
    Empty,
    Multiple,
    NotText,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("is absent"),
            Self::Empty => f.write_str("is empty"),
            Self::Multiple => f.write_str("has more than one value"),
            Self::NotText => f.write_str("is not visible ASCII"),
        }
    }
}

/// Internal failure kinds. These never leave the [`Authorizer`](super::Authorizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("shared secret is not valid base32: {0}")]
    InvalidEncoding(OtpError),
    #[error("{header} header {reason}")]
    MissingCredential {
        header: &'static str,
        reason: MissingReason,
    },
    #[error("{0} does not match")]
    Mismatch(Credential),
    #[error("code generation failed: {0}")]
    Crypto(OtpError),
}

impl From<OtpError> for AuthError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::InvalidEncoding { .. } => Self::InvalidEncoding(err),
            OtpError::Hmac => Self::Crypto(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_otp_error() {
        let invalid = OtpError::InvalidEncoding {
            character: '1',
            position: 0,
        };
        assert_eq!(
            AuthError::from(invalid.clone()),
            AuthError::InvalidEncoding(invalid)
        );
        assert_eq!(
            AuthError::from(OtpError::Hmac),
            AuthError::Crypto(OtpError::Hmac)
        );
    }

    #[test]
    fn test_display() {
        let err = AuthError::MissingCredential {
            header: "key",
            reason: MissingReason::Multiple,
        };
        assert_eq!(err.to_string(), "key header has more than one value");
        assert_eq!(
            AuthError::Mismatch(Credential::Identity).to_string(),
            "identity does not match"
        );
    }
}
