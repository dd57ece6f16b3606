/*!
 * PDF text engines.
 *
 * Both engines return one string per page. Some PDFs defeat one parser but
 * not the other, which is why the extractor chains them.
 */

use lopdf::Document;

use super::guard_panic;
use crate::errors::ExtractionError;

/// A PDF parser that can produce per-page text
pub trait PdfEngine: Send + Sync {
    /// Short engine name used in logs and errors
    fn name(&self) -> &'static str;

    /// Extract the text of every page, in page order
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Primary engine backed by lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        guard_panic(self.name(), || {
            let doc = Document::load_mem(bytes).map_err(|e| self.error(e))?;

            doc.get_pages()
                .keys()
                .map(|page_num| doc.extract_text(&[*page_num]).map_err(|e| self.error(e)))
                .collect()
        })
    }
}

impl LopdfEngine {
    fn error(&self, e: impl std::fmt::Display) -> ExtractionError {
        ExtractionError::Pdf { engine: self.name(), message: e.to_string() }
    }
}

/// Fallback engine backed by pdf-extract
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractEngine;

impl PdfEngine for PdfExtractEngine {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        guard_panic(self.name(), || {
            pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| ExtractionError::Pdf {
                engine: self.name(),
                message: e.to_string(),
            })
        })
    }
}
