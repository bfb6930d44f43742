use super::{AuthError, Step};
use crate::otp::Window;
use tracing::{debug, info, warn};

/// Diagnostic events emitted while a request is being authorized.
///
/// Events carry identities and codes, never the shared secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent<'a> {
    IdentityReceived { identity: &'a str },
    IdentityAccepted,
    OverrideCompared { incoming: &'a str, matched: bool },
    CodeCompared {
        incoming: &'a str,
        expected: &'a str,
        window: Window,
    },
    CodeAccepted { window: Window },
    Failed { step: Step, error: &'a AuthError },
    Decided { allowed: bool },
}

/// Receives [`AuthEvent`]s. Implementations must not influence the decision.
pub trait AuthObserver: Send + Sync {
    fn record(&self, event: &AuthEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AuthObserver for TracingObserver {
    fn record(&self, event: &AuthEvent<'_>) {
        match event {
            AuthEvent::IdentityReceived { identity } => {
                debug!(target: "nowcast::auth", identity, "identity received");
            }
            AuthEvent::IdentityAccepted => {
                debug!(target: "nowcast::auth", "identity is valid");
            }
            AuthEvent::OverrideCompared { incoming, matched } => {
                warn!(target: "nowcast::auth", incoming, matched, "static override code in use");
            }
            AuthEvent::CodeCompared {
                incoming,
                expected,
                window,
            } => {
                debug!(target: "nowcast::auth", incoming, expected, %window, "comparing key");
            }
            AuthEvent::CodeAccepted { window } => {
                debug!(target: "nowcast::auth", %window, "key matches");
            }
            AuthEvent::Failed { step, error } => {
                info!(target: "nowcast::auth", %step, %error, "validation failed");
            }
            AuthEvent::Decided { allowed } => {
                debug!(target: "nowcast::auth", allowed, "authorization decided");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AuthObserver for NoopObserver {
    fn record(&self, _event: &AuthEvent<'_>) {}
}
