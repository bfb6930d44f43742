use super::{ForecastError, MinuteForecast};
use crate::APP_USER_AGENT;
use anyhow::Result;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_FORECAST_URL: &str = "https://api.darksky.net/forecast";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    minutely: Option<Minutely>,
}

#[derive(Debug, Deserialize)]
struct Minutely {
    #[serde(default)]
    data: Vec<MinuteForecast>,
}

/// Client for a Dark Sky compatible forecast API.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl ForecastClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// `{base}/{api_key}/{latitude},{longitude}?units=us`
    ///
    /// # Errors
    /// Returns [`ForecastError::BaseUrl`] if the base URL cannot have a path.
    pub fn request_url(&self, latitude: f64, longitude: f64) -> Result<Url, ForecastError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ForecastError::BaseUrl)?
            .pop_if_empty()
            .push(self.api_key.expose_secret())
            .push(&format!("{latitude},{longitude}"));
        url.query_pairs_mut().clear().append_pair("units", "us");
        Ok(url)
    }

    /// Fetch the minutely block for a coordinate pair.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, an
    /// undecodable body or a response without minutely data.
    #[instrument(skip(self))]
    pub async fn minutely(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<MinuteForecast>, ForecastError> {
        let url = self.request_url(latitude, longitude)?;

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ForecastError::Status(response.status()));
        }

        let forecast: ForecastResponse = response.json().await?;
        let minutes = forecast
            .minutely
            .ok_or(ForecastError::MissingMinutely)?
            .data;

        debug!("forecast returned {} minutes", minutes.len());

        Ok(minutes)
    }
}
