use std::sync::Arc;

use polyglot_core::translate::{DeepL, Translator};
use polyglot_core::{Config, Pipeline};
use polyglot_pdf::{PdfTextExtractor, PdfWriter};

/// Shared application state accessible from all handlers.
///
/// The pipeline (and the provider client inside it) is constructed
/// once here and shared read-only across requests.
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let translator: Arc<dyn Translator> = Arc::new(DeepL::from_config(&config));
        let pipeline = Pipeline::new(
            Arc::new(PdfTextExtractor),
            translator,
            Arc::new(PdfWriter),
            config,
        );
        Self { pipeline }
    }
}
