use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::headers::extract_api_key;
use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::state::AppState;

const UPGRADE_EVENT: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub user_id: Uuid,
}

/// POST /webhook - payment-provider callback
///
/// Authenticated by a shared API key. Only `user.upgraded` events do
/// anything; everything else is acknowledged with 204 so the provider stops
/// retrying.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    let api_key = extract_api_key(&headers)?;
    if api_key != state.config.polka_key {
        return Err(ApiError::unauthorized("Invalid API key"));
    }

    if req.event != UPGRADE_EVENT {
        return Ok(StatusCode::NO_CONTENT);
    }

    let upgraded = UserStore::new(state.pool.clone())
        .upgrade_to_chirpy_red(req.data.user_id)
        .await?;

    match upgraded {
        Some(user) => {
            tracing::info!(user_id = %user.id, "user upgraded to Chirpy Red");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::not_found(format!(
            "User with ID {} not found",
            req.data.user_id
        ))),
    }
}
