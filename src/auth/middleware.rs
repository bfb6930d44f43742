use super::Authorizer;
use crate::otp::Clock;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Let the request through only if the authorizer allows it; otherwise `403` with no body.
pub async fn require_otp<C>(
    State(authorizer): State<Authorizer<C>>,
    request: Request,
    next: Next,
) -> Response
where
    C: Clock + Clone + 'static,
{
    if authorizer.authorize(request.headers()) {
        next.run(request).await
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}
