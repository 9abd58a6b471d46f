pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::optimize::handlers;
use crate::state::AppState;

/// Uploaded résumés are usually well under a megabyte, but scanned PDFs can
/// run large; 15 MiB leaves headroom over the 2 MiB Axum default.
const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_get_catalog))
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route("/api/v1/session/reset", post(handlers::handle_reset))
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
