use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use review_core::error::ReviewError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn join(err: tokio::task::JoinError) -> Self {
        Self(anyhow::anyhow!("task join error: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<ReviewError>() {
            match e {
                ReviewError::NotInitialized
                | ReviewError::InvalidProposalId(_)
                | ReviewError::EmptyRecord => StatusCode::BAD_REQUEST,
                ReviewError::ProposalNotFound(_) => StatusCode::NOT_FOUND,
                ReviewError::MissingIdentity => StatusCode::UNAUTHORIZED,
                ReviewError::Io(_) | ReviewError::Yaml(_) | ReviewError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
