/*!
 * Tests for the upload naming policy
 */

use notestack::filename::{build_filename, is_allowed_upload, sanitize_component, UNKNOWN_FIELD};

/// Test the canonical example from the upload form
#[test]
fn test_build_filename_withSpacesAndPunctuation_shouldSanitize() {
    let name = build_filename(Some("Math 101"), Some("CS"), Some("E-42"));
    assert_eq!(name, "Math_101_CS_E42.pdf");
}

/// Test that a missing enrollment id falls back to Unknown
#[test]
fn test_build_filename_withMissingEnrollment_shouldUseUnknown() {
    assert_eq!(build_filename(Some("Bio"), Some("Sci"), None), "Bio_Sci_Unknown.pdf");
    assert_eq!(build_filename(Some("Bio"), Some("Sci"), Some("")), "Bio_Sci_Unknown.pdf");
}

/// Test that every component is restricted to [A-Za-z0-9_]
#[test]
fn test_build_filename_withArbitraryInput_shouldOnlyContainSafeCharacters() {
    let inputs = ["../../etc/passwd", "Ünïcødé näme", "a\tb\nc", "<script>", "   ", "A_B C-D.E"];
    for subject in inputs {
        for department in inputs {
            let name = build_filename(Some(subject), Some(department), Some(subject));
            let stem = name.strip_suffix(".pdf").unwrap();
            assert!(
                stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unsafe stem {:?}",
                stem
            );
        }
    }
}

/// Test that the same inputs always give the same name
#[test]
fn test_build_filename_withSameInputs_shouldBeDeterministic() {
    let a = build_filename(Some("Physics II"), Some("EE"), Some("2021/07"));
    let b = build_filename(Some("Physics II"), Some("EE"), Some("2021/07"));
    assert_eq!(a, b);
    assert_eq!(a, "Physics_II_EE_202107.pdf");
}

/// Test that the extension stays .pdf even for DOCX uploads
#[test]
fn test_build_filename_shouldAlwaysUsePdfExtension() {
    assert!(build_filename(None, None, None).ends_with(".pdf"));
    assert_eq!(build_filename(None, None, None), "Unknown_Unknown_Unknown.pdf");
}

/// Test that a component made only of punctuation becomes empty
#[test]
fn test_sanitize_component_withOnlyPunctuation_shouldBeEmpty() {
    assert_eq!(sanitize_component(Some("!!!")), "");
    assert_eq!(sanitize_component(None), UNKNOWN_FIELD);
}

/// Test allowed upload extensions
#[test]
fn test_is_allowed_upload_withVariousExtensions_shouldMatchPolicy() {
    assert!(is_allowed_upload("notes.pdf"));
    assert!(is_allowed_upload("notes.DOCX"));
    assert!(is_allowed_upload("archive.tar.pdf"));
    assert!(!is_allowed_upload("notes.doc"));
    assert!(!is_allowed_upload("notes.txt"));
    assert!(!is_allowed_upload("pdf"));
    assert!(!is_allowed_upload(""));
}
