/*!
 * Content safety classification of uploaded notes.
 *
 * A single model is asked for an approve/reject verdict. The check fails
 * open: when the verdict cannot be obtained the note is approved and the
 * reason says the automated check was unavailable.
 */

use log::{debug, warn};
use std::sync::Arc;

use super::models::{SafetyStatus, SafetyVerdict};
use super::parsing::parse_model_json;
use super::prompts::{safety_prompt, truncate_chars};
use crate::errors::AttemptError;
use crate::providers::Provider;

/// Reason attached to a fail-open verdict
pub const UNAVAILABLE_REASON: &str = "AI check unavailable, manual review marked.";

/// Single-model moderation check
#[derive(Debug, Clone)]
pub struct SafetyClassifier {
    provider: Arc<dyn Provider>,
    model: String,
    max_chars: usize,
}

impl SafetyClassifier {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, max_chars: usize) -> Self {
        Self { provider, model: model.into(), max_chars }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify `text`; never fails
    pub async fn classify(&self, text: &str) -> SafetyVerdict {
        match self.request_verdict(text).await {
            Ok(verdict) => {
                debug!("Safety verdict from {}: {:?}", self.model, verdict.status);
                verdict
            }
            Err(e) => {
                warn!("AI safety check error ({}): {}", self.model, e);
                Self::unavailable()
            }
        }
    }

    /// Verdict used when the model could not be consulted
    pub fn unavailable() -> SafetyVerdict {
        SafetyVerdict {
            status: SafetyStatus::Approved,
            reason: UNAVAILABLE_REASON.to_string(),
        }
    }

    async fn request_verdict(&self, text: &str) -> Result<SafetyVerdict, AttemptError> {
        let prompt = safety_prompt(truncate_chars(text, self.max_chars));
        let response = self.provider.invoke(&self.model, &prompt).await?;
        parse_model_json(&response.text)
    }
}
