use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use review_core::identity::require_user;

use crate::error::AppError;
use crate::identity::HeaderIdentity;
use crate::state::AppState;

/// GET /user.json: the identity the server attributes actions to.
pub async fn get_user(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = require_user(&HeaderIdentity {
        headers: &headers,
        config: &app.config.server,
    })?;
    Ok(Json(serde_json::json!({ "user": user })))
}
