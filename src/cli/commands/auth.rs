use crate::otp::base32;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, builder::ValueParser};
use secrecy::SecretString;

pub const ARG_EXPECTED_ID: &str = "expected-id";
pub const ARG_OTP_KEY: &str = "otp-key";
pub const ARG_EXPECTED_OTP: &str = "expected-otp";

/// Reject shared secrets that are empty or not base32.
#[must_use]
pub fn validator_otp_key() -> ValueParser {
    ValueParser::from(move |key: &str| -> std::result::Result<String, String> {
        if key.is_empty() {
            return Err("OTP key must not be empty".to_string());
        }
        base32::decode(key)
            .map(|_| key.to_string())
            .map_err(|e| e.to_string())
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EXPECTED_ID)
                .long(ARG_EXPECTED_ID)
                .help("Caller identity expected in the `id` header")
                .env("NOWCAST_EXPECTED_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_OTP_KEY)
                .long(ARG_OTP_KEY)
                .help("Base32 encoded TOTP shared secret")
                .env("NOWCAST_OTP_KEY")
                .hide_env_values(true)
                .value_parser(validator_otp_key())
                .required(true),
        )
        .arg(
            Arg::new(ARG_EXPECTED_OTP)
                .long(ARG_EXPECTED_OTP)
                .help("Static code accepted in place of TOTP values, for testing only")
                .env("NOWCAST_EXPECTED_OTP")
                .hide_env_values(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub expected_id: String,
    pub otp_key: SecretString,
    pub expected_otp: Option<String>,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let expected_id = matches
            .get_one::<String>(ARG_EXPECTED_ID)
            .cloned()
            .context("missing required argument: --expected-id")?;
        let otp_key = matches
            .get_one::<String>(ARG_OTP_KEY)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --otp-key")?;
        let expected_otp = matches
            .get_one::<String>(ARG_EXPECTED_OTP)
            .filter(|code| !code.is_empty())
            .cloned();

        Ok(Self {
            expected_id,
            otp_key,
            expected_otp,
        })
    }
}
