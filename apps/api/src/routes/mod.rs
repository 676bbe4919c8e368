pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Field extraction
        .route("/api/v1/extract", post(extraction::handle_extract_pdf))
        .route("/api/v1/extract/text", post(extraction::handle_extract_text))
        // Document rendering
        .route("/api/v1/resume/preview", post(render::handle_preview))
        .route("/api/v1/resume/pdf", post(render::handle_render_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
