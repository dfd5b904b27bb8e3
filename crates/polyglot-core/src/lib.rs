use thiserror::Error;

pub mod config;
pub mod layout;
pub mod pipeline;
pub mod segment;
pub mod translate;

// Re-export for convenience
pub use config::Config;
pub use pipeline::{Pipeline, TranslatedDocument};
pub use translate::Translator;

/// Recovers plain text from raw PDF bytes.
///
/// Implementations may block; the pipeline runs extraction on a
/// blocking task.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<String, String>;
}

/// Serializes laid-out pages into PDF bytes.
pub trait PageRenderer: Send + Sync {
    fn render(&self, pages: &[layout::Page]) -> Result<Vec<u8>, String>;
}

/// Everything that can terminate a translation request. All failures
/// are terminal: no retries, no partial output, no substitute content.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No PDF data provided in request body")]
    EmptyInput,
    #[error("Translation API key not configured")]
    Configuration,
    #[error("Could not extract text from the PDF: {0}. The PDF must contain selectable text.")]
    Extraction(String),
    #[error("Translation failed: {0}")]
    Translation(String),
    #[error("Failed to assemble the output PDF: {0}")]
    Emission(String),
}
