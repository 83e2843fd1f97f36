use std::sync::atomic::Ordering;

use axum::{extract::Request, extract::State, middleware::Next, response::Response};

use crate::state::AppState;

/// Best-effort hit counter, surfaced on the admin metrics page. Relaxed
/// ordering is fine: nothing depends on the exact value.
pub async fn track_hits(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}

/// Log every non-success response with its method and path. Success traffic
/// is already covered by the HTTP trace layer.
pub async fn log_failures(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(%method, %path, %status, "request failed");
    }

    response
}
