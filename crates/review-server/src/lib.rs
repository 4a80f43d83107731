pub mod error;
pub mod identity;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Paths the original board client fetches
        .route("/proposals.json", get(routes::proposals::list_proposals))
        .route("/user.json", get(routes::user::get_user))
        .route("/data.json", get(routes::data::get_data))
        .route("/data/{id}", post(routes::data::append))
        // Reconciled board
        .route("/api/board", get(routes::board::get_board))
        .route("/api/board/reload", post(routes::board::reload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the review server for the project at `root` on a pre-bound listener.
///
/// The caller binds the `TcpListener` so it can read the actual port before
/// starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let app_state = AppState::load(root)?;
    let actual_port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("review server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/board");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
