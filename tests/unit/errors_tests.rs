/*!
 * Tests for error types and conversions
 */

use std::io;
use std::path::PathBuf;

use notestack::errors::{AppError, AttemptError, ExtractionError, ProviderError};

/// Test provider errors display their detail
#[test]
fn test_provider_error_display_shouldIncludeDetail() {
    let error = ProviderError::ApiError { status_code: 503, message: "overloaded".to_string() };
    assert_eq!(error.to_string(), "API responded with error: 503 - overloaded");

    let error = ProviderError::AuthenticationError("bad key".to_string());
    assert!(error.to_string().contains("bad key"));
}

/// Test rate limit detection across variants
#[test]
fn test_is_rate_limited_shouldDetectAllForms() {
    assert!(ProviderError::RateLimitExceeded("quota".to_string()).is_rate_limited());
    assert!(ProviderError::ApiError { status_code: 429, message: String::new() }.is_rate_limited());
    assert!(ProviderError::ConnectionError("got 429 from upstream".to_string()).is_rate_limited());
    assert!(!ProviderError::ApiError { status_code: 401, message: "denied".to_string() }.is_rate_limited());
}

/// Test attempt errors wrap provider errors transparently
#[test]
fn test_attempt_error_fromProvider_shouldKeepMessageAndRateLimit() {
    let provider = ProviderError::RateLimitExceeded("429 quota".to_string());
    let attempt = AttemptError::from(provider.clone());

    assert_eq!(attempt.to_string(), provider.to_string());
    assert!(attempt.is_rate_limited());
    assert!(!AttemptError::Unparseable("eof".to_string()).is_rate_limited());
}

/// Test conversions into the application error
#[test]
fn test_app_error_conversions_shouldPickMatchingVariant() {
    let app: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = ProviderError::ParseError("eof".to_string()).into();
    assert!(matches!(app, AppError::Provider(_)));

    let app: AppError = ExtractionError::Docx("bad zip".to_string()).into();
    assert!(matches!(app, AppError::Extraction(_)));

    let app: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app, AppError::Unknown(ref m) if m == "something odd"));
}

/// Test the no-text error names the note
#[test]
fn test_no_text_content_display_shouldNameFile() {
    let error = AppError::NoTextContent(PathBuf::from("uploads/Bio_Sci_Unknown.pdf"));
    assert!(error.to_string().contains("Bio_Sci_Unknown.pdf"));
}
