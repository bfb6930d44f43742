use crate::{
    auth::{AuthConfig, Authorizer},
    cli::telemetry,
    nowcast::{self, ForecastState, forecast::ForecastClient},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub expected_id: String,
    pub otp_key: SecretString,
    pub expected_otp: Option<String>,
    pub forecast_api_key: SecretString,
    pub forecast_url: Url,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Args {
    /// Authorization settings, with the shared secret decoded once.
    #[must_use]
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.expected_id.clone(), self.otp_key.expose_secret())
            .with_override_code(self.expected_otp.clone())
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the forecast client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.auth_config();
    debug!("auth config: {:?}", config);

    if config.override_code().is_some() {
        warn!("static OTP override is enabled, every caller presenting it is accepted");
    }

    let authorizer = Authorizer::new(Arc::new(config));

    let client = ForecastClient::new(args.forecast_url, args.forecast_api_key)?;
    let forecast =
        ForecastState::new(client).with_location_override(args.latitude, args.longitude);

    let result = nowcast::new(args.port, authorizer, forecast).await;

    telemetry::shutdown_tracer();

    result
}
