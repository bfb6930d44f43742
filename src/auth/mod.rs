//! Request authorization by caller identity and one-time code.
//!
//! The [`Authorizer`] reads two headers, checks the identity against the
//! configured one and, only if that passes, checks the code against the
//! previous, current and next TOTP windows. The result is a plain `bool`:
//! every failure, including a secret that never decoded, is a deny.

mod config;
mod credentials;
mod error;
pub mod middleware;
mod observer;

pub use config::AuthConfig;
pub use credentials::{ID_HEADER, KEY_HEADER, single_value};
pub use error::{AuthError, Credential, MissingReason};
pub use observer::{AuthEvent, AuthObserver, NoopObserver, TracingObserver};

use crate::otp::{Clock, SystemClock, Window, totp};
use axum::http::HeaderMap;
use std::{fmt, sync::Arc};
use subtle::ConstantTimeEq;

/// Stage of an authorization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Identity,
    Code,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Code => f.write_str("code"),
        }
    }
}

/// How an accepted code was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    Override,
    Window(Window),
}

#[derive(Clone)]
pub struct Authorizer<C = SystemClock> {
    config: Arc<AuthConfig>,
    clock: C,
    observer: Arc<dyn AuthObserver>,
}

impl Authorizer<SystemClock> {
    #[must_use]
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Authorizer<C> {
    #[must_use]
    pub fn with_clock(config: Arc<AuthConfig>, clock: C) -> Self {
        Self {
            config,
            clock,
            observer: Arc::new(TracingObserver),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn AuthObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Allow only if both the identity and the code check pass.
    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        let outcome = self
            .check_identity(headers)
            .map_err(|error| (Step::Identity, error))
            .and_then(|()| {
                self.check_code(headers)
                    .map_err(|error| (Step::Code, error))
            });

        let allowed = match outcome {
            Ok(_) => true,
            Err((step, error)) => {
                self.observer.record(&AuthEvent::Failed {
                    step,
                    error: &error,
                });
                false
            }
        };

        self.observer.record(&AuthEvent::Decided { allowed });

        allowed
    }

    /// Compare the `id` header with the configured identity.
    ///
    /// # Errors
    /// [`AuthError::MissingCredential`] or [`AuthError::Mismatch`].
    pub fn check_identity(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let identity = single_value(headers, ID_HEADER)?;
        self.observer
            .record(&AuthEvent::IdentityReceived { identity });

        if bool::from(
            identity
                .as_bytes()
                .ct_eq(self.config.expected_id().as_bytes()),
        ) {
            self.observer.record(&AuthEvent::IdentityAccepted);
            Ok(())
        } else {
            Err(AuthError::Mismatch(Credential::Identity))
        }
    }

    /// Compare the `key` header with the override code, or with the TOTP
    /// codes of the current, previous and next windows.
    ///
    /// All three codes are computed and compared on every call.
    ///
    /// # Errors
    /// [`AuthError::MissingCredential`], [`AuthError::Mismatch`],
    /// [`AuthError::InvalidEncoding`] or [`AuthError::Crypto`].
    pub fn check_code(&self, headers: &HeaderMap) -> Result<CodeMatch, AuthError> {
        let incoming = single_value(headers, KEY_HEADER)?;

        if let Some(override_code) = self.config.override_code() {
            let matched = bool::from(incoming.as_bytes().ct_eq(override_code.as_bytes()));
            self.observer
                .record(&AuthEvent::OverrideCompared { incoming, matched });

            return if matched {
                Ok(CodeMatch::Override)
            } else {
                Err(AuthError::Mismatch(Credential::Code))
            };
        }

        let secret = self.config.secret()?;
        let now = self.clock.now();

        let mut first = None;

        for window in Window::VERIFY_ORDER {
            let expected = totp::code_at(secret, now, window)?;
            self.observer.record(&AuthEvent::CodeCompared {
                incoming,
                expected: &expected,
                window,
            });

            let matched = bool::from(incoming.as_bytes().ct_eq(expected.as_bytes()));
            if matched && first.is_none() {
                first = Some(window);
            }
        }

        match first {
            Some(window) => {
                self.observer.record(&AuthEvent::CodeAccepted { window });
                Ok(CodeMatch::Window(window))
            }
            None => Err(AuthError::Mismatch(Credential::Code)),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Authorizer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
