use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Error processing PDF: {0}")]
    PdfExtraction(#[from] ExtractionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PdfExtraction(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PDF_EXTRACTION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let response = AppError::Validation("No file selected".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "No file selected");
    }

    #[tokio::test]
    async fn test_pdf_extraction_maps_to_422() {
        let response = AppError::from(ExtractionError::NotPdf).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PDF_EXTRACTION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Error processing PDF: not a PDF document"
        );
    }

    #[tokio::test]
    async fn test_render_error_message_is_exposed() {
        let response = AppError::from(RenderError::PageLimitExceeded { limit: 2 }).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RENDER_ERROR");
        assert_eq!(
            body["error"]["message"],
            "resume does not fit within 2 pages"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "An internal server error occurred");
    }
}
