use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::headers::extract_bearer;
use crate::auth::jwt::{make_jwt, ACCESS_TOKEN_MAX_TTL_SECS};
use crate::auth::password::check_password_hash;
use crate::auth::refresh::{make_refresh_token, REFRESH_TOKEN_TTL_DAYS};
use crate::database::refresh_tokens::RefreshTokenStore;
use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::handlers::users::UserResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional shorter access-token lifetime; capped at one hour.
    #[serde(default)]
    pub expires_in_seconds: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/login - verify credentials, issue an access token and a fresh
/// refresh token.
///
/// Unknown email and wrong password produce the same 401 so the response
/// does not reveal which half was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let users = UserStore::new(state.pool.clone());

    let user = users
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect email or password"))?;

    if !check_password_hash(&req.password, &user.hashed_password)? {
        return Err(ApiError::unauthorized("Incorrect email or password"));
    }

    let ttl = req
        .expires_in_seconds
        .filter(|secs| *secs > 0)
        .map(|secs| secs.min(ACCESS_TOKEN_MAX_TTL_SECS))
        .unwrap_or(ACCESS_TOKEN_MAX_TTL_SECS);

    let token = make_jwt(user.id, ttl, &state.config.jwt_secret)?;

    let refresh_token = make_refresh_token();
    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    RefreshTokenStore::new(state.pool.clone())
        .create(&refresh_token, user.id, expires_at)
        .await?;

    tracing::info!(user_id = %user.id, "login succeeded");

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh - trade a valid refresh token for a new one-hour access
/// token. The refresh token itself is not rotated; it stays valid until its
/// own expiry or an explicit revoke.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let refresh_token = extract_bearer(&headers)?;

    let user = RefreshTokenStore::new(state.pool.clone())
        .resolve_user(refresh_token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let token = make_jwt(user.id, ACCESS_TOKEN_MAX_TTL_SECS, &state.config.jwt_secret)?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke - revoke the presented refresh token. Always 204: the
/// caller cannot tell "revoked now" from "was never there".
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = extract_bearer(&headers)?;

    let revoked = RefreshTokenStore::new(state.pool.clone())
        .revoke(refresh_token)
        .await?;
    if !revoked {
        tracing::debug!("revoke matched no stored token");
    }

    Ok(StatusCode::NO_CONTENT)
}
