//! Map parsed command-line arguments to the action to run.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_PORT, auth, forecast};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let auth_opts = auth::Options::parse(matches)?;
    let forecast_opts = forecast::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        expected_id: auth_opts.expected_id,
        otp_key: auth_opts.otp_key,
        expected_otp: auth_opts.expected_otp,
        forecast_api_key: forecast_opts.api_key,
        forecast_url: forecast_opts.url,
        latitude: forecast_opts.latitude,
        longitude: forecast_opts.longitude,
    }))
}
