use crate::nowcast::{ForecastState, forecast::encode_minutes};
use axum::{
    extract::{Extension, Path},
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[utoipa::path(
    get,
    path= "/api/forecast/{latitude}/{longitude}",
    params (
        ("latitude" = f64, Path, description = "Latitude in degrees, -90 to 90"),
        ("longitude" = f64, Path, description = "Longitude in degrees, -180 to 180"),
    ),
    responses (
        (status = 200, description = "60 hex digits, one per minute: type (rain 1, snow 2, sleet/hail 3) times intensity bin (0-5). Empty on failure.", body = String),
        (status = 403, description = "Missing or invalid id/key headers"),
    ),
    security (
        ("id" = [], "key" = [])
    ),
    tag= "forecast"
)]
// axum handler for forecast
pub async fn forecast(
    state: Extension<Arc<ForecastState>>,
    Path((latitude, longitude)): Path<(f64, f64)>,
) -> Json<String> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        warn!("Failed geo location validation: {}, {}", latitude, longitude);
        return Json(String::new());
    }

    let (latitude, longitude) = state.location(latitude, longitude);

    let minutes = match state.client.minutely(latitude, longitude).await {
        Ok(minutes) => minutes,
        Err(e) => {
            error!("Error during forecast call: {}", e);
            return Json(String::new());
        }
    };

    match encode_minutes(&minutes) {
        Ok(binned) => {
            debug!("value returned to caller: {}", binned);
            Json(binned)
        }
        Err(e) => {
            error!("Error encoding forecast: {}", e);
            Json(String::new())
        }
    }
}
