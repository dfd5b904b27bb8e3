use thiserror::Error;

pub mod emit;
pub mod extract;

pub use emit::PdfWriter;
pub use extract::PdfTextExtractor;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("the uploaded file is not a PDF")]
    NotPdf,
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("failed to serialize document: {0}")]
    Emission(String),
}
