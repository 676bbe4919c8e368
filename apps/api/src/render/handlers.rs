use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::render::{normalize::normalize_document, render_resume};
use crate::state::AppState;

pub const PDF_FILENAME: &str = "resume.pdf";

/// POST /api/v1/resume/preview
/// Returns the document exactly as the renderer will see it.
pub async fn handle_preview(
    Json(doc): Json<ResumeDocument>,
) -> Result<Json<ResumeDocument>, AppError> {
    doc.validate().map_err(AppError::Validation)?;
    Ok(Json(normalize_document(&doc)))
}

/// POST /api/v1/resume/pdf
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(doc): Json<ResumeDocument>,
) -> Result<Response, AppError> {
    doc.validate().map_err(AppError::Validation)?;

    let page_config = state.page_config.clone();
    let bytes = tokio::task::spawn_blocking(move || render_resume(&doc, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(bytes = bytes.len(), "Rendered resume PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={PDF_FILENAME}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
