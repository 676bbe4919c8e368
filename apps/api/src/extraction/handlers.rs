use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_from_text;
use crate::models::ContactRecord;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "pdf";

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    pub text: String,
}

/// POST /api/v1/extract
/// Accepts a multipart upload with a `pdf` field and returns the contact fields found in it.
pub async fn handle_extract_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ContactRecord>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        // A part without a filename is a plain form value, not a file.
        let file_name = match (field.name(), field.file_name()) {
            (Some(UPLOAD_FIELD), Some(file_name)) => file_name.to_string(),
            _ => continue,
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("No PDF file provided".to_string()))?;
    check_file_name(&file_name)?;

    let text = state.text_extractor.extract_text(data).await?;
    let record = extract_from_text(&text);
    info!(
        file = %file_name,
        lines = text.lines().count(),
        name_found = !record.name.is_empty(),
        email_found = !record.email.is_empty(),
        "Extracted contact fields from upload"
    );
    Ok(Json(record))
}

/// POST /api/v1/extract/text
pub async fn handle_extract_text(
    Json(req): Json<ExtractTextRequest>,
) -> Json<ContactRecord> {
    Json(extract_from_text(&req.text))
}

fn check_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation("File must be a PDF".to_string()));
    }
    Ok(())
}
