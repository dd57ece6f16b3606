/*!
 * AI content generation for study notes.
 *
 * - `client`: fallback-model generation of summaries and questions
 * - `safety`: single-model, fail-open moderation
 * - `prompts`: prompt templates and text budgets
 * - `parsing`: fence stripping and JSON decoding of model output
 * - `models`: request and result types
 */

pub mod client;
pub mod models;
pub mod parsing;
pub mod prompts;
pub mod safety;

// Re-export main types
pub use client::GenerationClient;
pub use models::{
    FailureKind, GenerationParams, GenerationResult, Question, QuestionMode, QuestionSet,
    SafetyStatus, SafetyVerdict, Summary, TaskKind,
};
pub use safety::SafetyClassifier;
