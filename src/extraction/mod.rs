/*!
 * Plain-text extraction from uploaded notes.
 *
 * PDFs go through a primary engine page by page and fall back to a second
 * engine when the first one yields nothing but whitespace. DOCX files are
 * read paragraph by paragraph. The nullable entry point [`TextExtractor::extract`]
 * never fails: any error is logged and reported as `None`.
 */

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::errors::ExtractionError;

pub mod docx;
pub mod pdf;

pub use pdf::{LopdfEngine, PdfEngine, PdfExtractEngine};

/// Kind of document accepted for extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the kind from the path extension, ignoring case
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// A stored upload; never modified after it has been written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    /// Where the file lives on disk
    pub storage_path: PathBuf,
    /// Name the user uploaded it under
    pub original_filename: String,
    /// Format of the original upload
    pub kind: DocumentKind,
}

/// Text extractor with a primary and a fallback PDF engine
pub struct TextExtractor {
    primary: Box<dyn PdfEngine>,
    fallback: Box<dyn PdfEngine>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::with_engines(Box::new(LopdfEngine), Box::new(PdfExtractEngine))
    }
}

impl TextExtractor {
    /// Create an extractor with the default lopdf → pdf-extract chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom PDF engines
    pub fn with_engines(primary: Box<dyn PdfEngine>, fallback: Box<dyn PdfEngine>) -> Self {
        Self { primary, fallback }
    }

    /// Extract the text of a document, or `None` if anything goes wrong.
    ///
    /// Whitespace-only DOCX content comes back as an empty string.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let path = path.as_ref();
        match self.try_extract(path) {
            Ok(text) => {
                info!("Extraction complete for {:?}: {} chars", path, text.chars().count());
                Some(text)
            }
            Err(e) => {
                error!("Error extracting text from {:?}: {}", path, e);
                None
            }
        }
    }

    /// Extract the text of a document, reporting why it failed
    pub fn try_extract<P: AsRef<Path>>(&self, path: P) -> Result<String, ExtractionError> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(path.display().to_string()))?;
        self.try_extract_as(path, kind)
    }

    /// Extract a stored upload using its recorded kind rather than the
    /// storage name, which always ends in `.pdf`
    pub fn extract_document(&self, document: &UploadedDocument) -> Option<String> {
        match self.try_extract_as(&document.storage_path, document.kind) {
            Ok(text) => Some(text),
            Err(e) => {
                error!("Error extracting text from {:?}: {}", document.storage_path, e);
                None
            }
        }
    }

    /// Extract `path` as a document of the given kind
    pub fn try_extract_as(&self, path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
        let bytes = fs::read(path)?;
        let text = match kind {
            DocumentKind::Pdf => self.extract_pdf(path, &bytes)?,
            DocumentKind::Docx => {
                debug!("Extracting DOCX: {:?}", path);
                docx::extract_paragraphs(&bytes)?
            }
        };

        Ok(text.trim().to_string())
    }

    fn extract_pdf(&self, path: &Path, bytes: &[u8]) -> Result<String, ExtractionError> {
        debug!("Extracting PDF with {}: {:?}", self.primary.name(), path);
        let mut text = join_pages(self.primary.page_texts(bytes)?);

        if text.trim().is_empty() {
            warn!(
                "{} found no text in {:?}, trying {}",
                self.primary.name(),
                path,
                self.fallback.name()
            );
            text.push_str(&join_pages(self.fallback.page_texts(bytes)?));
        }

        Ok(text)
    }
}

/// Run a parser, turning a panic on malformed input into an error
pub(crate) fn guard_panic<T>(
    engine: &'static str,
    f: impl FnOnce() -> Result<T, ExtractionError>,
) -> Result<T, ExtractionError> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(ExtractionError::EnginePanicked(engine)))
}

/// Concatenate non-empty pages, each followed by a newline
fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.is_empty())
        .fold(String::new(), |mut acc, page| {
            acc.push_str(&page);
            acc.push('\n');
            acc
        })
}
