//! Downstream minute-by-minute forecast and its hex bin encoding.

pub mod bins;
pub mod client;

pub use bins::{MINUTES, MinuteForecast, encode_minutes};
pub use client::ForecastClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("forecast provider returned {0}")]
    Status(reqwest::StatusCode),
    #[error("forecast URL cannot carry path segments")]
    BaseUrl,
    #[error("forecast has no minutely block")]
    MissingMinutely,
    #[error("forecast has {available} minutes, need a full hour")]
    TooFewMinutes { available: usize },
}
