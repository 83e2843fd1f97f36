use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

/// Why a credential could not be pulled out of the request headers. Callers
/// collapse every variant to 401; the distinction exists for logging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not valid text")]
    InvalidHeader,

    #[error("Authorization header must use {0} scheme")]
    WrongScheme(&'static str),

    #[error("empty credential in Authorization header")]
    EmptyCredential,
}

/// Extract a bearer credential from the request headers. Pure parsing, no
/// I/O. The header must be exactly `Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    extract_scheme(headers, "Bearer")
}

/// Extract the payment-provider API key, sent as `Authorization: ApiKey <key>`.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    extract_scheme(headers, "ApiKey")
}

fn extract_scheme<'h>(
    headers: &'h HeaderMap,
    scheme: &'static str,
) -> Result<&'h str, AuthHeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthHeaderError::MissingHeader)?;

    let value = value
        .to_str()
        .map_err(|_| AuthHeaderError::InvalidHeader)?;

    // Case-sensitive prefix, single space
    let credential = value
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(AuthHeaderError::WrongScheme(scheme))?;

    let credential = credential.trim();
    if credential.is_empty() {
        return Err(AuthHeaderError::EmptyCredential);
    }

    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            extract_bearer(&headers_with("Bearer abc123")).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn missing_header_is_distinct() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()).unwrap_err(),
            AuthHeaderError::MissingHeader
        );
    }

    #[test]
    fn wrong_scheme_is_distinct() {
        assert_eq!(
            extract_bearer(&headers_with("Basic abc123")).unwrap_err(),
            AuthHeaderError::WrongScheme("Bearer")
        );
        // Lowercase prefix does not count, the match is case-sensitive
        assert_eq!(
            extract_bearer(&headers_with("bearer abc123")).unwrap_err(),
            AuthHeaderError::WrongScheme("Bearer")
        );
    }

    #[test]
    fn empty_token_is_distinct() {
        assert_eq!(
            extract_bearer(&headers_with("Bearer ")).unwrap_err(),
            AuthHeaderError::EmptyCredential
        );
        assert_eq!(
            extract_bearer(&headers_with("Bearer    ")).unwrap_err(),
            AuthHeaderError::EmptyCredential
        );
    }

    #[test]
    fn api_key_uses_its_own_scheme() {
        assert_eq!(
            extract_api_key(&headers_with("ApiKey f271c81ff7084ee5b99a5091b42d486e")).unwrap(),
            "f271c81ff7084ee5b99a5091b42d486e"
        );
        assert_eq!(
            extract_api_key(&headers_with("Bearer f271c81f")).unwrap_err(),
            AuthHeaderError::WrongScheme("ApiKey")
        );
    }
}
