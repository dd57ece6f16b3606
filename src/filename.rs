/*!
 * Storage filename policy for uploaded notes.
 *
 * Uploads are stored under a name derived from the subject, department and
 * uploader enrollment id, so the same triple always maps to the same file
 * and a re-upload overwrites the previous one.
 */

use std::path::Path;

/// Placeholder used when a naming field is absent or empty
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Extensions accepted for upload
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

/// Extension every stored note receives.
///
/// Stored names always end in `.pdf`, even for DOCX uploads. Downstream
/// links are built from this name, so it is kept as is.
const STORED_EXTENSION: &str = "pdf";

/// Build the storage filename `<subject>_<department>_<enrollment>.pdf`
pub fn build_filename(
    subject: Option<&str>,
    department: Option<&str>,
    enrollment_id: Option<&str>,
) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize_component(subject),
        sanitize_component(department),
        sanitize_component(enrollment_id),
        STORED_EXTENSION
    )
}

/// Default an absent field, drop everything but ASCII alphanumerics, spaces
/// and underscores, then turn spaces into underscores.
pub fn sanitize_component(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_FIELD,
    };

    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '_')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Check that an uploaded filename carries a pdf or docx extension
pub fn is_allowed_upload(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            ALLOWED_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
