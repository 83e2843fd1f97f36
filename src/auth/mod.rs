// Credential handling: password hashing, access-token codec, header parsing
// and refresh-token generation.

pub mod headers;
pub mod jwt;
pub mod password;
pub mod refresh;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::ApiError;

/// Resolve the acting user for a protected route: pull the bearer credential
/// out of the request headers and validate it as an access token. The user id
/// embedded in the token, not any client-supplied field, is the authoritative
/// identity.
pub fn authenticate(headers: &HeaderMap, jwt_secret: &str) -> Result<Uuid, ApiError> {
    let token = headers::extract_bearer(headers)?;
    let user_id = jwt::validate_jwt(token, jwt_secret)?;
    Ok(user_id)
}
