pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::grading::handlers as api;
use crate::shell::handlers as page;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(page::handle_page))
        .route("/grade", post(page::handle_grade_form))
        .route("/upload", post(page::handle_upload))
        .route("/reset", post(page::handle_reset))
        .route("/retry", post(page::handle_retry))
        // JSON API
        .route("/api/v1/grade", post(api::handle_grade))
        .route("/api/v1/session", get(api::handle_session))
        .layer(body_limit)
        .with_state(state)
}
