/*!
 * Provider implementations for generative text services.
 *
 * This module contains client implementations behind a common interface:
 * - Gemini: hosted generative-language API
 * - Mock: scripted provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Text returned by a model for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: String,
}

impl RawModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Common trait for all LLM providers
///
/// A provider turns a model id and a prompt into raw text. Fallback across
/// models is the caller's job, so one `invoke` is exactly one remote call.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Send `prompt` to `model`
    ///
    /// # Returns
    /// * `Result<RawModelResponse, ProviderError>` - The model's text or an error
    async fn invoke(&self, model: &str, prompt: &str) -> Result<RawModelResponse, ProviderError>;

    /// Test the connection to the provider with the given model
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;

    /// Whether credentials are present; callers skip the model loop when not
    fn is_configured(&self) -> bool {
        true
    }
}

pub mod gemini;
pub mod mock;
