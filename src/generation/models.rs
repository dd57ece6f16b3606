/*!
 * Request and result types for AI content generation.
 *
 * Field names follow the JSON the web layer serves to the browser, so a
 * result can be handed to the caller with a plain `serde_json::to_value`.
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which artifact to generate from a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Summary,
    Questions,
    Safety,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Questions => write!(f, "questions"),
            Self::Safety => write!(f, "safety"),
        }
    }
}

/// Question style requested by the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    #[default]
    Objective,
    Subjective,
}

impl fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Objective => write!(f, "objective"),
            Self::Subjective => write!(f, "subjective"),
        }
    }
}

impl FromStr for QuestionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "objective" => Ok(Self::Objective),
            "subjective" => Ok(Self::Subjective),
            _ => Err(anyhow::anyhow!("Invalid question mode: {}", s)),
        }
    }
}

/// Parameters for question generation; ignored by the other tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default)]
    pub mode: QuestionMode,
    #[serde(default)]
    pub marks: Option<u32>,
    #[serde(default = "default_question_count")]
    pub count: u32,
}

fn default_question_count() -> u32 {
    1
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            mode: QuestionMode::default(),
            marks: None,
            count: default_question_count(),
        }
    }
}

impl GenerationParams {
    pub fn new(mode: QuestionMode, marks: Option<u32>, count: u32) -> Self {
        Self { mode, marks, count: count.max(1) }
    }
}

/// Short and detailed summary of a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub short_summary: String,
    #[serde(default)]
    pub detailed_summary: Vec<String>,
}

impl Summary {
    /// Summary-shaped result that only carries a message for the student
    pub fn message(text: impl Into<String>) -> Self {
        Self { short_summary: text.into(), detailed_summary: Vec::new() }
    }
}

/// A single generated practice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub marks: Option<u32>,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: String,
}

/// Generated question set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// Moderation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Approved,
    Rejected,
}

/// Moderation verdict with the model's explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub status: SafetyStatus,
    #[serde(default)]
    pub reason: String,
}

impl SafetyVerdict {
    pub fn is_approved(&self) -> bool {
        self.status == SafetyStatus::Approved
    }
}

/// Why a generation call degraded instead of producing content.
///
/// Lists every failure category of the pipeline. Only `RateLimited` is
/// returned as a `GenerationResult::Error`; the others are absorbed into
/// default-shaped results or a fail-open verdict and show up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ExtractionFailure,
    ModelUnparseable,
    RateLimited,
    AllModelsExhausted,
    SafetyCheckUnavailable,
}

/// Result of a generation call; serialized untagged so each variant keeps
/// its own JSON shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Summary(Summary),
    QuestionSet(QuestionSet),
    SafetyVerdict(SafetyVerdict),
    Error { kind: FailureKind, message: String },
}

impl GenerationResult {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Error { kind: FailureKind::RateLimited, .. })
    }

    pub fn as_summary(&self) -> Option<&Summary> {
        match self {
            Self::Summary(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_questions(&self) -> Option<&QuestionSet> {
        match self {
            Self::QuestionSet(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_verdict(&self) -> Option<&SafetyVerdict> {
        match self {
            Self::SafetyVerdict(v) => Some(v),
            _ => None,
        }
    }
}

/// Models answer marks as `5`, `"5"` or `null`; anything unreadable is dropped
fn lenient_marks<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
