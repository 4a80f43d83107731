use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use review_core::action::{ActionBody, ActionLog};
use review_core::identity::require_user;
use review_core::store::LogMap;
use review_core::{paths, proposal, ReviewError};

use crate::error::AppError;
use crate::identity::HeaderIdentity;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /data.json: every proposal's action log, keyed by proposal id.
pub async fn get_data(State(app): State<AppState>) -> Result<Json<LogMap>, AppError> {
    let store = app.store.clone();
    let logs = tokio::task::spawn_blocking(move || store.load_all())
        .await
        .map_err(AppError::join)??;

    tracing::debug!(proposals = logs.len(), "served action logs");
    Ok(Json(logs))
}

// ---------------------------------------------------------------------------
// Append
// ---------------------------------------------------------------------------

/// POST /data/{id}: append the viewer's rating, retraction, comment, or
/// comment deletion. The author is taken from the request identity, never
/// from the body. Returns the proposal's full updated log.
pub async fn append(
    State(app): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ActionBody>,
) -> Result<Json<ActionLog>, AppError> {
    let author = require_user(&HeaderIdentity {
        headers: &headers,
        config: &app.config.server,
    })?;
    paths::validate_proposal_id(&id)?;

    let records = body.into_records(&author);
    if records.is_empty() {
        return Err(ReviewError::EmptyRecord.into());
    }

    let store = app.store.clone();
    let proposals_path = app.proposals_path();
    let proposal_id = id.clone();
    let log = tokio::task::spawn_blocking(move || {
        let proposals = proposal::load_all(&proposals_path)?;
        if !proposals.iter().any(|p| p.id == proposal_id) {
            return Err(ReviewError::ProposalNotFound(proposal_id));
        }
        store.append_many(&proposal_id, records)
    })
    .await
    .map_err(AppError::join)??;

    tracing::debug!(proposal = %id, author = %author, len = log.len(), "appended action");
    Ok(Json(log))
}
