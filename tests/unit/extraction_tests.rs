/*!
 * Tests for PDF/DOCX text extraction
 */

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

use notestack::errors::ExtractionError;
use notestack::extraction::DocumentKind;
use notestack::TextExtractor;
use crate::common;

/// Writes a single-page PDF showing `text` in Courier
fn create_test_pdf(dir: &Path, filename: &str, text: &str) -> Result<PathBuf> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 48.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    let path = dir.join(filename);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Test DOCX paragraphs come back newline-separated and trimmed
#[test]
fn test_extract_withDocx_shouldJoinParagraphs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_docx(temp_dir.path(), "notes.docx", &["Hello", "World"])?;

    let text = TextExtractor::new().extract(&path);

    assert_eq!(text.as_deref(), Some("Hello\nWorld"));
    Ok(())
}

/// Test the extension check ignores case
#[test]
fn test_extract_withUppercaseExtension_shouldStillExtract() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_docx(temp_dir.path(), "NOTES.DOCX", &["Chapter 1"])?;

    assert_eq!(TextExtractor::new().extract(&path).as_deref(), Some("Chapter 1"));
    assert_eq!(DocumentKind::from_path(&path), Some(DocumentKind::Docx));
    Ok(())
}

/// Test a DOCX with only blank paragraphs yields the empty string, not None
#[test]
fn test_extract_withBlankDocx_shouldReturnEmptyString() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_docx(temp_dir.path(), "blank.docx", &["", "   ", ""])?;

    assert_eq!(TextExtractor::new().extract(&path).as_deref(), Some(""));
    Ok(())
}

/// Test text is pulled from a generated PDF
#[test]
fn test_extract_withSimplePdf_shouldReturnPageText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = create_test_pdf(temp_dir.path(), "lecture.pdf", "Hello World!")?;

    let text = TextExtractor::new().extract(&path).unwrap_or_default();

    assert!(text.contains("Hello World!"), "got {:?}", text);
    assert_eq!(text, text.trim());
    Ok(())
}

/// Test a corrupt PDF never panics and reports absence
#[test]
fn test_extract_withCorruptPdf_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.pdf", "%PDF-1.4 this is not really a pdf")?;

    assert_eq!(TextExtractor::new().extract(&path), None);
    Ok(())
}

/// Test a corrupt DOCX reports absence
#[test]
fn test_extract_withCorruptDocx_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.docx", "PK not a zip")?;

    assert_eq!(TextExtractor::new().extract(&path), None);
    Ok(())
}

/// Test a missing file reports absence
#[test]
fn test_extract_withMissingFile_shouldReturnNone() {
    assert_eq!(TextExtractor::new().extract("does/not/exist.pdf"), None);
}

/// Test unsupported extensions are rejected before reading
#[test]
fn test_tryExtract_withUnsupportedExtension_shouldReportFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.txt", "plain text")?;

    let extractor = TextExtractor::new();
    assert!(matches!(extractor.try_extract(&path), Err(ExtractionError::UnsupportedFormat(_))));
    assert_eq!(extractor.extract(&path), None);
    Ok(())
}
