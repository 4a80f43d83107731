use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /proposals.json: proposals not marked `ignored`, as `{ "results": [...] }`.
pub async fn list_proposals(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = app.proposals_path();
    let proposals =
        tokio::task::spawn_blocking(move || review_core::proposal::load_visible(&path))
            .await
            .map_err(AppError::join)??;

    tracing::debug!(count = proposals.len(), "listed proposals");
    Ok(Json(serde_json::json!({ "results": proposals })))
}
