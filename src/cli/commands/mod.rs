pub mod auth;
pub mod forecast;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("nowcast")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("NOWCAST_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    let command = forecast::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use url::Url;

    const REQUIRED: [&str; 7] = [
        "nowcast",
        "--expected-id",
        "alice",
        "--otp-key",
        "JBSWY3DPEHPK3PXP",
        "--forecast-api-key",
        "darksky-key",
    ];

    const ENV_VARS: [&str; 9] = [
        "NOWCAST_PORT",
        "NOWCAST_EXPECTED_ID",
        "NOWCAST_OTP_KEY",
        "NOWCAST_EXPECTED_OTP",
        "NOWCAST_FORECAST_API_KEY",
        "NOWCAST_FORECAST_URL",
        "NOWCAST_LATITUDE",
        "NOWCAST_LONGITUDE",
        "NOWCAST_LOG_LEVEL",
    ];

    fn without_env<F: FnOnce()>(f: F) {
        let vars: Vec<(&str, Option<&str>)> = ENV_VARS.iter().map(|k| (*k, None)).collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "nowcast");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        without_env(|| {
            let matches = new().get_matches_from(REQUIRED);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<Url>(forecast::ARG_URL).map(Url::as_str),
                Some("https://api.darksky.net/forecast")
            );
            assert_eq!(matches.get_one::<f64>(forecast::ARG_LATITUDE), None);
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(0));

            let auth = auth::Options::parse(&matches).unwrap();
            assert_eq!(auth.expected_id, "alice");
            assert_eq!(auth.otp_key.expose_secret(), "JBSWY3DPEHPK3PXP");
            assert_eq!(auth.expected_otp, None);
        });
    }

    #[test]
    fn test_missing_required() {
        without_env(|| {
            let result = new().try_get_matches_from(["nowcast", "--expected-id", "alice"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_rejects_invalid_otp_key() {
        without_env(|| {
            for key in ["", "NOT-BASE32", "JBSWY3DP1"] {
                let result = new().try_get_matches_from([
                    "nowcast",
                    "--expected-id",
                    "alice",
                    "--otp-key",
                    key,
                    "--forecast-api-key",
                    "darksky-key",
                ]);
                assert!(result.is_err(), "{key:?} should be rejected");
            }
        });
    }

    #[test]
    fn test_env() {
        temp_env::with_vars(
            [
                ("NOWCAST_PORT", Some("9090")),
                ("NOWCAST_EXPECTED_ID", Some("bob")),
                ("NOWCAST_OTP_KEY", Some("gezdgnbvgy3tqojq")),
                ("NOWCAST_EXPECTED_OTP", Some("123456")),
                ("NOWCAST_FORECAST_API_KEY", Some("darksky-key")),
                ("NOWCAST_FORECAST_URL", Some("http://127.0.0.1:3000/forecast")),
                ("NOWCAST_LATITUDE", Some("47.6")),
                ("NOWCAST_LONGITUDE", Some("-122.3")),
                ("NOWCAST_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(["nowcast"]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
                assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));

                let auth = auth::Options::parse(&matches).unwrap();
                assert_eq!(auth.expected_id, "bob");
                assert_eq!(auth.expected_otp.as_deref(), Some("123456"));

                let forecast = forecast::Options::parse(&matches).unwrap();
                assert_eq!(forecast.url.as_str(), "http://127.0.0.1:3000/forecast");
                assert_eq!(forecast.latitude, Some(47.6));
                assert_eq!(forecast.longitude, Some(-122.3));
            },
        );
    }

    #[test]
    fn test_negative_coordinates_on_command_line() {
        without_env(|| {
            let mut args = REQUIRED.to_vec();
            args.extend(["--latitude", "-33.9", "--longitude", "151.2"]);
            let matches = new().get_matches_from(args);

            let forecast = forecast::Options::parse(&matches).unwrap();
            assert_eq!(forecast.latitude, Some(-33.9));
            assert_eq!(forecast.longitude, Some(151.2));
        });
    }

    #[test]
    fn test_verbosity_flags() {
        without_env(|| {
            let mut args = REQUIRED.to_vec();
            args.push("-vvv");
            let matches = new().get_matches_from(args);
            assert_eq!(matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(3));
        });
    }

    #[test]
    fn test_empty_expected_otp_is_unset() {
        without_env(|| {
            let mut args = REQUIRED.to_vec();
            args.extend(["--expected-otp", ""]);
            let matches = new().get_matches_from(args);
            let auth = auth::Options::parse(&matches).unwrap();
            assert_eq!(auth.expected_otp, None);
        });
    }
}
