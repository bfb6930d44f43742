use anyhow::{Context, Result, ensure};
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    routing::get,
};
use nowcast::{
    auth::{AuthConfig, Authorizer, ID_HEADER, KEY_HEADER},
    nowcast::{ForecastState, forecast::ForecastClient, router},
    otp::{FixedClock, Window, base32, totp},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

const NOW: i64 = 1_700_000_000;
const SECRET: &str = "JBSWY3DPEHPK3PXP";

type Requests = Arc<Mutex<Vec<String>>>;

// Dark Sky shaped payload. The api key picks the behavior.
async fn fake_forecast(
    State(requests): State<Requests>,
    Path((key, coordinates)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if let Ok(mut requests) = requests.lock() {
        requests.push(format!(
            "{key}/{coordinates}?units={}",
            query.get("units").map_or("", String::as_str)
        ));
    }

    let minutes = |count: usize| -> Vec<Value> {
        (0..count)
            .map(|minute| match minute % 4 {
                0 => json!({ "precipIntensity": 0.0 }),
                1 => json!({ "precipIntensity": 0.08, "precipType": "rain" }),
                2 => json!({ "precipIntensity": 0.2, "precipType": "snow" }),
                _ => json!({ "precipIntensity": 1.0, "precipType": "sleet" }),
            })
            .collect()
    };

    match key.as_str() {
        "short" => (
            StatusCode::OK,
            Json(json!({ "minutely": { "data": minutes(10) } })),
        ),
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "boom" })),
        ),
        "hourly-only" => (StatusCode::OK, Json(json!({ "hourly": {} }))),
        _ => (
            StatusCode::OK,
            Json(json!({ "minutely": { "data": minutes(61) } })),
        ),
    }
}

async fn spawn_upstream() -> Result<(Url, Requests)> {
    let requests: Requests = Arc::default();
    let app = Router::new()
        .route("/forecast/:key/:coordinates", get(fake_forecast))
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((Url::parse(&format!("http://{addr}/forecast"))?, requests))
}

fn app(base_url: Url, api_key: &str, override_code: Option<&str>) -> Result<Router> {
    let config = AuthConfig::new("alice", SECRET)
        .with_override_code(override_code.map(ToString::to_string));
    let authorizer = Authorizer::with_clock(Arc::new(config), FixedClock(NOW));
    let client = ForecastClient::new(base_url, SecretString::from(api_key.to_string()))?;
    Ok(router(authorizer, Arc::new(ForecastState::new(client))))
}

fn code(window: Window) -> Result<String> {
    let secret = base32::decode(SECRET)?;
    Ok(totp::code_at(&secret, NOW, window)?)
}

async fn get_forecast(app: Router, uri: &str, id: &str, key: &str) -> Result<(StatusCode, String)> {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(ID_HEADER, id)
                .header(KEY_HEADER, key)
                .body(Body::empty())?,
        )
        .await?;

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(body.to_vec())?))
}

// rain 0.08 -> 1*2, snow 0.2 -> 2*3, sleet 1.0 -> 3*5
fn expected_hex() -> String {
    "026F".repeat(15)
}

#[tokio::test]
async fn test_forecast_with_current_code() -> Result<()> {
    let (base_url, requests) = spawn_upstream().await?;
    let app = app(base_url, "darksky-key", None)?;

    let (status, body) = get_forecast(
        app,
        "/api/forecast/47.6062/-122.3321",
        "alice",
        &code(Window::Current)?,
    )
    .await?;

    ensure!(status == StatusCode::OK, "unexpected status {status}");
    let value: String = serde_json::from_str(&body)?;
    assert_eq!(value.len(), 60);
    assert_eq!(value, expected_hex());

    let requests = requests
        .lock()
        .map_err(|_| anyhow::anyhow!("poisoned"))?
        .clone();
    assert_eq!(requests, vec!["darksky-key/47.6062,-122.3321?units=us"]);
    Ok(())
}

#[tokio::test]
async fn test_forecast_with_adjacent_windows() -> Result<()> {
    let (base_url, _) = spawn_upstream().await?;

    for window in [Window::Previous, Window::Next] {
        let app = app(base_url.clone(), "darksky-key", None)?;
        let (status, body) =
            get_forecast(app, "/api/forecast/10/20", "alice", &code(window)?).await?;
        assert_eq!(status, StatusCode::OK, "{window}");
        assert_eq!(serde_json::from_str::<String>(&body)?, expected_hex());
    }
    Ok(())
}

#[tokio::test]
async fn test_forecast_rejects_bad_credentials() -> Result<()> {
    let (base_url, requests) = spawn_upstream().await?;
    let current = code(Window::Current)?;

    let wrong_code = if current == "000000" { "111111" } else { "000000" };

    for (id, key) in [("alice", wrong_code), ("bob", current.as_str()), ("", "")] {
        let app = app(base_url.clone(), "darksky-key", None)?;
        let (status, body) = get_forecast(app, "/api/forecast/10/20", id, key).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{id}/{key}");
        assert!(body.is_empty());
    }

    let seen = requests
        .lock()
        .map_err(|_| anyhow::anyhow!("poisoned"))?
        .len();
    assert_eq!(seen, 0, "denied requests must not reach the upstream");
    Ok(())
}

#[tokio::test]
async fn test_forecast_with_override_code() -> Result<()> {
    let (base_url, _) = spawn_upstream().await?;
    let app = app(base_url, "darksky-key", Some("999999"))?;

    let (status, body) = get_forecast(app, "/api/forecast/10/20", "alice", "999999").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<String>(&body)?, expected_hex());
    Ok(())
}

#[tokio::test]
async fn test_forecast_upstream_failures_return_empty_string() -> Result<()> {
    let (base_url, _) = spawn_upstream().await?;

    for api_key in ["short", "broken", "hourly-only"] {
        let app = app(base_url.clone(), api_key, None)?;
        let (status, body) = get_forecast(
            app,
            "/api/forecast/10/20",
            "alice",
            &code(Window::Current)?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK, "{api_key}");
        assert_eq!(body, "\"\"", "{api_key}");
    }
    Ok(())
}

#[tokio::test]
async fn test_health_needs_no_credentials() -> Result<()> {
    let (base_url, _) = spawn_upstream().await?;
    let app = app(base_url, "darksky-key", None)?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let health: Value = serde_json::from_slice(&body)?;
    let name = health
        .get("name")
        .and_then(Value::as_str)
        .context("missing name")?;
    assert_eq!(name, "nowcast");
    Ok(())
}
