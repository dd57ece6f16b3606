/*!
 * Error types for the notestack application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Marker the hosted API embeds in error text when a quota is exhausted
const RATE_LIMIT_MARKER: &str = "429";

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether this error means the remote quota is exhausted.
    ///
    /// Besides the dedicated variant and a 429 status, any error whose text
    /// carries the 429 marker counts, since upstream libraries often fold the
    /// status into a plain message.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code: 429, .. } => true,
            other => other.to_string().contains(RATE_LIMIT_MARKER),
        }
    }
}

/// Errors that can occur while extracting text from an uploaded document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file extension is neither pdf nor docx
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The file could not be read
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// A PDF engine rejected the document
    #[error("PDF extraction failed ({engine}): {message}")]
    Pdf {
        /// Name of the engine that failed
        engine: &'static str,
        /// Error reported by the engine
        message: String,
    },

    /// The DOCX reader rejected the document
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// A parser panicked on malformed input
    #[error("Extraction engine {0} panicked")]
    EnginePanicked(&'static str),
}

/// Outcome of a single model attempt inside the fallback loop
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttemptError {
    /// The provider call itself failed
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// The model answered but not with the expected JSON shape
    #[error("Model response is not valid JSON of the expected shape: {0}")]
    Unparseable(String),
}

impl AttemptError {
    /// Rate limiting aborts the fallback loop instead of moving to the next model
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_rate_limited(),
            Self::Unparseable(_) => false,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// The upload was refused before storing it
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Extraction produced nothing to feed the model
    #[error("No text content available or extracted for this note: {0:?}")]
    NoTextContent(PathBuf),

    /// Configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
