//! PDF text source for the field extractor.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`. The default backend wraps the
//! `pdf-extract` crate; tests swap in a fixed-text fake.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a PDF document")]
    NotPdf,

    #[error("{0}")]
    Pdf(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Turns an uploaded document into plain text, one visual line per `\n`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, data: Bytes) -> Result<String, ExtractionError>;
}

/// Default backend: `pdf-extract`, run on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, data: Bytes) -> Result<String, ExtractionError> {
        if !looks_like_pdf(&data) {
            return Err(ExtractionError::NotPdf);
        }

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data).map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

        debug!(chars = text.len(), "Extracted text from PDF");
        Ok(text)
    }
}

/// PDF files start with `%PDF-`, possibly after a few bytes of junk.
fn looks_like_pdf(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}
