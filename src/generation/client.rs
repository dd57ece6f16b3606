/*!
 * Generation client with ordered model fallback.
 *
 * Models are tried in priority order. The first one whose answer parses
 * into the expected shape wins. A rate-limit error ends the loop at once;
 * any other failure moves on to the next model. When every model fails
 * the caller still receives a result of the requested shape.
 */

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::models::{
    FailureKind, GenerationParams, GenerationResult, QuestionSet, SafetyVerdict, Summary, TaskKind,
};
use super::parsing::parse_model_json;
use super::prompts::{questions_prompt, summary_prompt, truncate_chars};
use super::safety::SafetyClassifier;
use crate::app_config::GenerationConfig;
use crate::errors::{AttemptError, ProviderError};
use crate::providers::Provider;

/// Message returned when the provider has no credentials
pub const MISSING_KEY_MESSAGE: &str = "API key missing.";

/// Message returned when the remote quota is exhausted
pub const RATE_LIMITED_MESSAGE: &str =
    "AI Limit Reached: You've hit the model provider's rate limit. Please wait 1 minute before trying again.";

/// Terminal outcome of the fallback loop
enum LoopFailure {
    RateLimited(String),
    Exhausted(String),
}

/// Client for summary, question and safety generation
#[derive(Debug, Clone)]
pub struct GenerationClient {
    provider: Arc<dyn Provider>,
    models: Vec<String>,
    max_chars: usize,
    safety: SafetyClassifier,
}

impl GenerationClient {
    /// Create a client from generation settings
    pub fn new(provider: Arc<dyn Provider>, config: &GenerationConfig) -> Self {
        let safety = SafetyClassifier::new(
            Arc::clone(&provider),
            config.safety_model.clone(),
            config.safety_max_source_chars,
        );
        Self {
            provider,
            models: config.models.clone(),
            max_chars: config.max_source_chars,
            safety,
        }
    }

    /// Ordered fallback list
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate the artifact for `task`; never fails
    pub async fn generate(&self, task: TaskKind, text: &str, params: &GenerationParams) -> GenerationResult {
        match task {
            TaskKind::Summary => self.summarize(text).await,
            TaskKind::Questions => self.generate_questions(text, params).await,
            TaskKind::Safety => GenerationResult::SafetyVerdict(self.check_safety(text).await),
        }
    }

    /// Short and detailed summary of `text`
    pub async fn summarize(&self, text: &str) -> GenerationResult {
        if !self.provider.is_configured() {
            warn!("Skipping summary generation: {}", MISSING_KEY_MESSAGE);
            return GenerationResult::Summary(Summary::message(MISSING_KEY_MESSAGE));
        }

        let prompt = summary_prompt(truncate_chars(text, self.max_chars));
        match self.run_fallback::<Summary>(TaskKind::Summary, &prompt).await {
            Ok(summary) => GenerationResult::Summary(summary),
            Err(LoopFailure::RateLimited(message)) => rate_limited(message),
            Err(LoopFailure::Exhausted(last_error)) => GenerationResult::Summary(Summary::message(
                format!("Generation failed. Error: {}", last_error),
            )),
        }
    }

    /// Practice questions for `text`
    pub async fn generate_questions(&self, text: &str, params: &GenerationParams) -> GenerationResult {
        if !self.provider.is_configured() {
            warn!("Skipping question generation: {}", MISSING_KEY_MESSAGE);
            return GenerationResult::QuestionSet(QuestionSet::default());
        }

        let prompt = questions_prompt(truncate_chars(text, self.max_chars), params);
        match self.run_fallback::<QuestionSet>(TaskKind::Questions, &prompt).await {
            Ok(set) => GenerationResult::QuestionSet(set),
            Err(LoopFailure::RateLimited(message)) => rate_limited(message),
            Err(LoopFailure::Exhausted(_)) => GenerationResult::QuestionSet(QuestionSet::default()),
        }
    }

    /// Check that `model` answers at all
    pub async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        self.provider.test_connection(model).await
    }

    /// Moderation verdict; single model, fails open
    pub async fn check_safety(&self, text: &str) -> SafetyVerdict {
        self.safety.classify(text).await
    }

    async fn run_fallback<T: DeserializeOwned>(&self, task: TaskKind, prompt: &str) -> Result<T, LoopFailure> {
        let mut last_error = String::from("no models configured");

        for model in &self.models {
            debug!("Trying model {} for {}...", model, task);
            match self.attempt::<T>(model, prompt).await {
                Ok(value) => {
                    info!("Model {} produced {}", model, task);
                    return Ok(value);
                }
                Err(e) if e.is_rate_limited() => {
                    warn!("Model {} is rate limited, not trying further models: {}", model, e);
                    return Err(LoopFailure::RateLimited(e.to_string()));
                }
                Err(e) => {
                    warn!("Model {} failed: {}", model, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(LoopFailure::Exhausted(last_error))
    }

    async fn attempt<T: DeserializeOwned>(&self, model: &str, prompt: &str) -> Result<T, AttemptError> {
        let response = self.provider.invoke(model, prompt).await?;
        parse_model_json(&response.text)
    }
}

fn rate_limited(detail: String) -> GenerationResult {
    debug!("Rate limit detail: {}", detail);
    GenerationResult::Error {
        kind: FailureKind::RateLimited,
        message: RATE_LIMITED_MESSAGE.to_string(),
    }
}
