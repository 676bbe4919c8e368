// Page geometry, font metrics and line breaking for the PDF renderer.
// Everything here is pure and synchronous; callers run it inside spawn_blocking.

pub mod font_metrics;
pub mod page;
pub mod wrap;

pub use page::{default_page_config, PageConfig};
