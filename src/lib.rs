/*!
 * # NoteStack - AI study aids for shared notes
 *
 * A Rust library for turning uploaded study notes into AI-generated
 * summaries and practice questions.
 *
 * ## Features
 *
 * - Extract plain text from PDF (with a fallback engine) and DOCX notes
 * - Deterministic, sanitized storage filenames for uploads
 * - Summary and question generation over an ordered list of models
 * - Tolerant parsing of fenced JSON model output
 * - Fail-open content safety classification
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extraction`: PDF/DOCX text extraction
 * - `filename`: Upload naming and type policy
 * - `generation`: AI generation services:
 *   - `generation::client`: Model fallback loop
 *   - `generation::safety`: Content moderation
 *   - `generation::parsing`: Fence stripping and JSON decoding
 *   - `generation::prompts`: Prompt templates
 * - `providers`: Client implementations for generative text APIs:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::mock`: Scripted provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow the subject_condition_shouldOutcome convention
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod filename;
pub mod generation;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, StoredNote};
pub use errors::{AppError, AttemptError, ExtractionError, ProviderError};
pub use extraction::{DocumentKind, TextExtractor, UploadedDocument};
pub use filename::{build_filename, is_allowed_upload};
pub use generation::{GenerationClient, GenerationParams, GenerationResult, SafetyClassifier, TaskKind};
