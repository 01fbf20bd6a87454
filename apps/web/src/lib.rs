pub mod error;
pub mod routes;
pub mod settings;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.gate.max_upload_bytes() as usize + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health::health))
        .route(
            "/api/summarize",
            post(routes::summarize::summarize_video).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
