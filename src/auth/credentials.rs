use super::{AuthError, MissingReason};
use axum::http::HeaderMap;

/// Header carrying the caller identity.
pub const ID_HEADER: &str = "id";
/// Header carrying the one-time code.
pub const KEY_HEADER: &str = "key";

/// Read exactly one non-empty textual value for `name`.
///
/// # Errors
/// Returns [`AuthError::MissingCredential`] when the header is absent, repeated,
/// empty or not visible ASCII.
pub fn single_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, AuthError> {
    let missing = |reason| AuthError::MissingCredential {
        header: name,
        reason,
    };

    let mut values = headers.get_all(name).iter();
    let value = values.next().ok_or_else(|| missing(MissingReason::Absent))?;

    if values.next().is_some() {
        return Err(missing(MissingReason::Multiple));
    }

    let value = value
        .to_str()
        .map_err(|_| missing(MissingReason::NotText))?;

    if value.is_empty() {
        return Err(missing(MissingReason::Empty));
    }

    Ok(value)
}
