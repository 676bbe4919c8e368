pub mod canvas;
pub mod handlers;
pub mod normalize;
pub mod pdf;
pub mod template;

use thiserror::Error;
use tracing::debug;

use crate::layout::page::PageConfig;
use crate::models::ResumeDocument;
use canvas::{Canvas, Page};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("resume does not fit within {limit} pages")]
    PageLimitExceeded { limit: usize },

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Lays `doc` out on pages without serializing. `doc` must be normalized.
pub fn layout_resume(doc: &ResumeDocument, config: &PageConfig) -> Result<Vec<Page>, RenderError> {
    let (mut canvas, cursor) = Canvas::new(config.clone(), Some(template::footer()));
    template::draw_resume(&mut canvas, cursor, doc)?;
    debug!(pages = canvas.page_count(), "Laid out resume");
    Ok(canvas.finish())
}

/// Normalizes, lays out and serializes `doc` into a complete PDF.
pub fn render_resume(doc: &ResumeDocument, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let doc = normalize::normalize_document(doc);
    let pages = layout_resume(&doc, config)?;
    pdf::write_pdf(&pages, config)
}
