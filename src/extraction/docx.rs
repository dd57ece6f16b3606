/*!
 * DOCX paragraph extraction.
 */

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild, read_docx};

use super::guard_panic;
use crate::errors::ExtractionError;

/// Read body paragraphs in document order, one paragraph per line
pub fn extract_paragraphs(bytes: &[u8]) -> Result<String, ExtractionError> {
    guard_panic("docx-rs", || {
        let docx = read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut text = String::new();
        for child in docx.document.children.iter() {
            if let DocumentChild::Paragraph(para) = child {
                text.push_str(&paragraph_text(para));
                text.push('\n');
            }
        }

        Ok(text)
    })
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in para.children.iter() {
        if let ParagraphChild::Run(run) = child {
            for run_child in run.children.iter() {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}
