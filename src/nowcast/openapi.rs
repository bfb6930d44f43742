use super::handlers::{forecast, health};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

#[derive(OpenApi)]
#[openapi(
    paths(health::health, forecast::forecast),
    components(schemas(health::Health)),
    modifiers(&CredentialHeaders),
    tags(
        (name = "health", description = "Service status"),
        (name = "forecast", description = "Minute-by-minute precipitation")
    )
)]
struct ApiDoc;

/// The `id` and `key` headers checked by the OTP gate.
struct CredentialHeaders;

impl Modify for CredentialHeaders {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        for header in ["id", "key"] {
            components.add_security_scheme(
                header,
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(header))),
            );
        }
    }
}

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = Some(env!("CARGO_PKG_DESCRIPTION").to_string());
    doc
}
