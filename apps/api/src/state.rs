use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::layout::{default_page_config, PageConfig};

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry and page limit used by the renderer.
    pub page_config: PageConfig,
    /// Pluggable PDF text source. Default: PdfTextExtractor.
    pub text_extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub fn new(config: Config, text_extractor: Arc<dyn TextExtractor>) -> Self {
        let page_config = PageConfig {
            max_pages: config.render_max_pages,
            ..default_page_config()
        };
        Self {
            config,
            page_config,
            text_extractor,
        }
    }
}
