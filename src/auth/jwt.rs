use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Issuer claim carried by every access token this service signs
pub const TOKEN_ISSUER: &str = "chirpy";

/// Default and maximum access-token lifetime in seconds
pub const ACCESS_TOKEN_MAX_TTL_SECS: i64 = 60 * 60;

/// Access-token claims. Exactly four: issuer, subject (user id), issued-at
/// and expiry, all timestamps in integer Unix seconds.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token has no subject")]
    MissingSubject,

    #[error("token issued by someone else")]
    WrongIssuer,

    #[error("JWT secret is not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Sign a new access token for `user_id`, valid for `ttl_seconds` from now.
pub fn make_jwt(user_id: Uuid, ttl_seconds: i64, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: Some(user_id.to_string()),
        iat: now,
        exp: now + ttl_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify an access token and return the user id it was issued to.
///
/// Checks, in order: the token is well-formed, the signature matches, the
/// issuer is ours, the subject is present and non-empty, and the current
/// time is strictly less than `exp`. Expiry is exact-second: no leeway
/// window is applied,
/// which is why the expiry comparison is done here rather than left to the
/// library (its built-in check accepts `now == exp` and applies leeway).
pub fn validate_jwt(token: &str, secret: &str) -> Result<Uuid, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => JwtError::BadSignature,
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Malformed,
    })?;

    let claims = data.claims;

    // Only our own tokens count, even when correctly signed
    if claims.iss != TOKEN_ISSUER {
        return Err(JwtError::WrongIssuer);
    }

    let subject = match claims.sub.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(JwtError::MissingSubject),
    };

    // Clock is read once per call
    if Utc::now().timestamp() >= claims.exp {
        return Err(JwtError::Expired);
    }

    Uuid::parse_str(subject).map_err(|_| JwtError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "valid-secret-key";

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_returns_the_user_id() {
        let user_id = Uuid::new_v4();
        let token = make_jwt(user_id, 3600, SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(validate_jwt(&token, SECRET).unwrap(), user_id);
    }

    #[test]
    fn wrong_secret_is_a_signature_error() {
        let token = make_jwt(Uuid::new_v4(), 3600, SECRET).unwrap();
        assert_eq!(
            validate_jwt(&token, "wrong-secret-key").unwrap_err(),
            JwtError::BadSignature
        );
    }

    #[test]
    fn malformed_token_is_rejected_without_panic() {
        assert_eq!(
            validate_jwt("not.a.token", SECRET).unwrap_err(),
            JwtError::Malformed
        );
        assert_eq!(validate_jwt("", SECRET).unwrap_err(), JwtError::Malformed);
    }

    #[test]
    fn zero_ttl_token_is_already_expired() {
        let token = make_jwt(Uuid::new_v4(), 0, SECRET).unwrap();
        assert_eq!(validate_jwt(&token, SECRET).unwrap_err(), JwtError::Expired);
    }

    #[test]
    fn expiry_is_exact_second() {
        let now = Utc::now().timestamp();
        let user_id = Uuid::new_v4();

        // exp == now must fail: validity requires now strictly less than exp
        let expired = sign(&Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: Some(user_id.to_string()),
            iat: now - 3600,
            exp: now,
        });
        assert_eq!(validate_jwt(&expired, SECRET).unwrap_err(), JwtError::Expired);

        // Far enough in the future to be immune to the clock ticking mid-test
        let live = sign(&Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: Some(user_id.to_string()),
            iat: now,
            exp: now + 10,
        });
        assert_eq!(validate_jwt(&live, SECRET).unwrap(), user_id);
    }

    #[test]
    fn foreign_issuer_is_rejected_even_with_our_secret() {
        let now = Utc::now().timestamp();
        let token = sign(&Claims {
            iss: "impostor-service".to_string(),
            sub: Some(Uuid::new_v4().to_string()),
            iat: now,
            exp: now + 3600,
        });
        assert_eq!(
            validate_jwt(&token, SECRET).unwrap_err(),
            JwtError::WrongIssuer
        );
    }

    #[test]
    fn missing_or_empty_subject_is_rejected() {
        let now = Utc::now().timestamp();

        let no_sub = sign(&Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: None,
            iat: now,
            exp: now + 3600,
        });
        assert_eq!(
            validate_jwt(&no_sub, SECRET).unwrap_err(),
            JwtError::MissingSubject
        );

        let blank_sub = sign(&Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: Some("   ".to_string()),
            iat: now,
            exp: now + 3600,
        });
        assert_eq!(
            validate_jwt(&blank_sub, SECRET).unwrap_err(),
            JwtError::MissingSubject
        );
    }

    #[test]
    fn payload_carries_the_expected_claims() {
        use base64::Engine;

        let user_id = Uuid::new_v4();
        let token = make_jwt(user_id, 3600, SECRET).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .unwrap();
        let claims: Claims = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.sub.as_deref(), Some(user_id.to_string().as_str()));
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
