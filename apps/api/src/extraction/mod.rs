// Contact-field extraction from resume text.
// Rules are pure and synchronous; PDF decoding runs behind the TextExtractor seam.

pub mod fields;
pub mod handlers;
pub mod pdf_text;

pub use fields::extract_from_text;
pub use pdf_text::{ExtractionError, PdfTextExtractor, TextExtractor};
