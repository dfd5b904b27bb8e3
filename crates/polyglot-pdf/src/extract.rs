//! PDF text extraction backed by the `pdf-extract` crate.

use polyglot_core::TextExtractor;
use tracing::debug;

use crate::PdfError;

/// Magic prefix every well-formed PDF starts with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts plain text from in-memory PDF bytes.
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Extract the document's plain text, pages concatenated in order.
    ///
    /// Rejects payloads without the PDF magic prefix before handing
    /// them to the parser, so obvious junk fails fast with a clear
    /// message.
    pub fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, PdfError> {
        if !pdf_bytes.starts_with(PDF_MAGIC) {
            return Err(PdfError::NotPdf);
        }

        let text = pdf_extract::extract_text_from_mem(pdf_bytes)
            .map_err(|e| PdfError::Extraction(e.to_string()))?;

        debug!(bytes = pdf_bytes.len(), chars = text.len(), "extracted pdf text");
        Ok(text)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<String, String> {
        self.extract_text(pdf_bytes).map_err(|e| e.to_string())
    }
}
