use super::ForecastError;
use serde::Deserialize;

pub const MINUTES: usize = 60;

/// Lower bounds, in inches per hour, of intensity bins 1 through 5.
pub const INTENSITY_BINS: [f64; 5] = [0.010, 0.075, 0.150, 0.300, 0.750];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteForecast {
    #[serde(default)]
    pub precip_intensity: f64,
    #[serde(default)]
    pub precip_type: Option<String>,
}

/// Number of thresholds the intensity reaches, 0 to 5.
#[must_use]
pub fn bin(intensity: f64) -> u8 {
    let reached = INTENSITY_BINS
        .iter()
        .take_while(|&&threshold| intensity >= threshold)
        .count();
    u8::try_from(reached).unwrap_or(u8::MAX)
}

/// rain 1, snow 2, sleet and hail 3, anything else 0.
#[must_use]
pub fn multiplier(precip_type: Option<&str>) -> u8 {
    match precip_type {
        Some("rain") => 1,
        Some("snow") => 2,
        Some("sleet" | "hail") => 3,
        _ => 0,
    }
}

/// One upper-case hex digit per minute for the first 60 minutes.
///
/// # Errors
/// Returns [`ForecastError::TooFewMinutes`] if fewer than 60 minutes are given.
pub fn encode_minutes(minutes: &[MinuteForecast]) -> Result<String, ForecastError> {
    let minutes = minutes
        .get(..MINUTES)
        .ok_or(ForecastError::TooFewMinutes {
            available: minutes.len(),
        })?;

    Ok(minutes
        .iter()
        .map(|minute| {
            let value = multiplier(minute.precip_type.as_deref()) * bin(minute.precip_intensity);
            format!("{value:X}")
        })
        .collect())
}
