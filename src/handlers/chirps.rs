use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth;
use crate::database::chirps::{ChirpStore, DeleteOutcome};
use crate::database::models::Chirp;
use crate::error::ApiError;
use crate::moderation::clean_chirp;
use crate::state::AppState;

const MAX_CHIRP_LENGTH: usize = 140;

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChirpResponse {
    pub id: Uuid,
    pub body: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            body: chirp.body,
            user_id: chirp.user_id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
        }
    }
}

/// POST /api/chirps - create a chirp as the authenticated user
pub async fn create_chirp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), ApiError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    if req.body.trim().is_empty() {
        return Err(ApiError::bad_request("Chirp body cannot be empty"));
    }
    if req.body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Chirp is too long. Max length is {}",
            MAX_CHIRP_LENGTH
        )));
    }

    let cleaned = clean_chirp(&req.body);

    let chirp = ChirpStore::new(state.pool.clone())
        .create(&cleaned, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// GET /api/chirps - all chirps, oldest first
pub async fn get_chirps(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let chirps = ChirpStore::new(state.pool.clone()).list_all().await?;
    Ok(Json(chirps.into_iter().map(Into::into).collect()))
}

/// GET /api/chirps/{id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let chirp = ChirpStore::new(state.pool.clone())
        .get(chirp_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chirp with ID {} not found", chirp_id)))?;

    Ok(Json(chirp.into()))
}

/// DELETE /api/chirps/{id} - owners only. A chirp that exists but belongs to
/// someone else is 403, distinct from 404 for one that does not exist.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    match ChirpStore::new(state.pool.clone())
        .delete_owned(chirp_id, user_id)
        .await?
    {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::Forbidden => {
            Err(ApiError::forbidden("You can only delete your own chirps"))
        }
        DeleteOutcome::NotFound => Err(ApiError::not_found(format!(
            "Chirp with ID {} not found",
            chirp_id
        ))),
    }
}
