//! HTTP surface: the OTP gate, the forecast endpoint and the health check.

pub mod forecast;
pub mod handlers;
mod openapi;

pub use openapi::openapi;

use crate::{
    auth::{Authorizer, middleware::require_otp},
    otp::Clock,
};
use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware::from_fn_with_state,
    routing::get,
};
use forecast::ForecastClient;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use ulid::Ulid;

/// Shared state of the forecast handler.
#[derive(Debug)]
pub struct ForecastState {
    pub client: ForecastClient,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ForecastState {
    #[must_use]
    pub fn new(client: ForecastClient) -> Self {
        Self {
            client,
            latitude: None,
            longitude: None,
        }
    }

    /// Fixed coordinates that replace whatever the caller asks for.
    #[must_use]
    pub fn with_location_override(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Requested coordinates with the configured overrides applied.
    #[must_use]
    pub fn location(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        (
            self.latitude.unwrap_or(latitude),
            self.longitude.unwrap_or(longitude),
        )
    }
}

/// Build the application router. Everything under `/api` requires a valid `id`/`key` pair.
pub fn router<C>(authorizer: Authorizer<C>, forecast: Arc<ForecastState>) -> Router
where
    C: Clock + Clone + 'static,
{
    let api = Router::new()
        .route(
            "/api/forecast/:latitude/:longitude",
            get(handlers::forecast),
        )
        .route_layer(from_fn_with_state(authorizer, require_otp::<C>));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(forecast)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new<C>(port: u16, authorizer: Authorizer<C>, forecast: ForecastState) -> Result<()>
where
    C: Clock + Clone + 'static,
{
    let app = router(authorizer, Arc::new(forecast));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
