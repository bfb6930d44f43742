use crate::nowcast::forecast::client::DEFAULT_FORECAST_URL;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use url::Url;

pub const ARG_API_KEY: &str = "forecast-api-key";
pub const ARG_URL: &str = "forecast-url";
pub const ARG_LATITUDE: &str = "latitude";
pub const ARG_LONGITUDE: &str = "longitude";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_KEY)
                .long(ARG_API_KEY)
                .help("Dark Sky API key")
                .env("NOWCAST_FORECAST_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_URL)
                .long(ARG_URL)
                .help("Forecast API base URL")
                .env("NOWCAST_FORECAST_URL")
                .default_value(DEFAULT_FORECAST_URL)
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            Arg::new(ARG_LATITUDE)
                .long(ARG_LATITUDE)
                .help("Latitude used for every request instead of the one in the path")
                .env("NOWCAST_LATITUDE")
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new(ARG_LONGITUDE)
                .long(ARG_LONGITUDE)
                .help("Longitude used for every request instead of the one in the path")
                .env("NOWCAST_LONGITUDE")
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(f64)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub api_key: SecretString,
    pub url: Url,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_key = matches
            .get_one::<String>(ARG_API_KEY)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --forecast-api-key")?;
        let url = matches
            .get_one::<Url>(ARG_URL)
            .cloned()
            .context("missing required argument: --forecast-url")?;

        Ok(Self {
            api_key,
            url,
            latitude: matches.get_one::<f64>(ARG_LATITUDE).copied(),
            longitude: matches.get_one::<f64>(ARG_LONGITUDE).copied(),
        })
    }
}
