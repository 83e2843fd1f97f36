use std::sync::atomic::Ordering;

use axum::{extract::State, response::Html};

use crate::config::Platform;
use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /admin/metrics - hit-counter page
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1>\
         <p>Chirpy has been visited {} times!</p></body></html>",
        hits
    ))
}

/// POST /admin/reset - zero the hit counter and delete every user (chirps
/// and refresh tokens cascade). Only available when PLATFORM=dev.
pub async fn reset(State(state): State<AppState>) -> Result<String, ApiError> {
    if state.config.platform != Platform::Dev {
        return Err(ApiError::forbidden(
            "Reset endpoint is only available in development environment",
        ));
    }

    state.hits.store(0, Ordering::Relaxed);

    let deleted = UserStore::new(state.pool.clone()).delete_all().await?;
    tracing::info!(deleted, "reset: all users deleted, hit counter zeroed");

    Ok("Hits reset to 0 and all users deleted".to_string())
}
