use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth;
use crate::auth::password::hash_password;
use crate::database::models::User;
use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::state::AppState;

/// Public view of a user: everything except the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users - register a new account
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if !is_valid_email(&req.email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    validate_password(&req.password)?;

    let hashed = hash_password(&req.password)?;

    let store = UserStore::new(state.pool.clone());
    let user = store
        .create(&req.email, &hashed)
        .await?
        .ok_or_else(|| ApiError::bad_request("Email already exists"))?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users - update email and/or password for the authenticated user
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    if req.email.is_none() && req.password.is_none() {
        return Err(ApiError::bad_request("No update fields provided"));
    }

    if let Some(email) = &req.email {
        if !is_valid_email(email) {
            return Err(ApiError::bad_request("Invalid email format"));
        }
    }

    let hashed = match &req.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let store = UserStore::new(state.pool.clone());
    let user = match store
        .update(user_id, req.email.as_deref(), hashed.as_deref())
        .await
    {
        Ok(user) => user.ok_or_else(|| ApiError::bad_request("User update failed"))?,
        // The email column is unique; taking someone else's address is the
        // caller's mistake, not a server failure
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ApiError::bad_request("Email already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(user.into()))
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 5 {
        return Err(ApiError::bad_request(
            "Password must be at least 5 characters long",
        ));
    }
    Ok(())
}

/// Minimal shape check: something@something.something, no whitespace, no
/// second @.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let ok = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@');

    match domain.rsplit_once('.') {
        Some((host, tld)) => ok(local) && ok(host) && ok(tld),
        None => false,
    }
}
