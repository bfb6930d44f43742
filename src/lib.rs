//! # Nowcast
//!
//! `nowcast` is a small proxy that returns minute-by-minute precipitation for a
//! coordinate pair, encoded as a 60 character hex string. Every API request is
//! gated by a time-based one-time password.
//!
//! ## Authorization
//!
//! Callers send an `id` header and a `key` header. The `id` must equal the
//! configured identity and the `key` must match the TOTP code for the current,
//! previous or next 30 second window. Any failure, including malformed input or
//! an undecodable shared secret, results in `403 Forbidden` with no body. The
//! reason is only recorded in the service traces.
//!
//! There is no replay protection: a code stays valid for its whole window.

pub mod auth;
pub mod cli;
pub mod nowcast;
pub mod otp;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
