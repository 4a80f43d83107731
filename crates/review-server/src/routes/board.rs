use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use review_core::identity::IdentitySource;
use review_core::{aggregate, proposal, ReviewError};

use crate::error::AppError;
use crate::identity::HeaderIdentity;
use crate::state::AppState;

/// GET /api/board: visible proposals grouped by subcategory, with reconciled
/// ratings and comments for the requesting viewer. Ordering is frozen per
/// server process until `POST /api/board/reload`.
pub async fn get_board(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let viewer = HeaderIdentity {
        headers: &headers,
        config: &app.config.server,
    }
    .current_user();

    let path = app.proposals_path();
    let store = app.store.clone();
    let order = app.order.clone();
    let for_viewer = viewer.clone();
    let groups = tokio::task::spawn_blocking(move || {
        let proposals = proposal::load_visible(&path)?;
        let logs = store.load_all()?;
        Ok::<_, ReviewError>(aggregate::aggregate(
            &proposals,
            &logs,
            &order,
            for_viewer.as_deref(),
        ))
    })
    .await
    .map_err(AppError::join)??;

    Ok(Json(serde_json::json!({
        "user": viewer,
        "groups": groups,
    })))
}

/// POST /api/board/reload: drop frozen ordering so the next board read
/// sorts by current ratings.
pub async fn reload(State(app): State<AppState>) -> Json<serde_json::Value> {
    let cleared = app.order.len();
    app.order.reset();
    tracing::info!(cleared, "board ordering reset");
    Json(serde_json::json!({ "reset": true, "cleared": cleared }))
}
