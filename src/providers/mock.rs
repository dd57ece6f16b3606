/*!
 * Mock provider implementation for testing.
 *
 * Replies are scripted per model id, with a default for unscripted models:
 * - `MockProvider::replying(text)` - Every model answers with `text`
 * - `MockProvider::failing(error)` - Every model fails with `error`
 * - `.with_model_reply(model, reply)` - Override one model
 *
 * Every invocation is recorded so tests can assert which models ran.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{Provider, RawModelResponse};

/// Scripted outcome for one model
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Answer with this text
    Text(String),
    /// Fail with this error
    Error(ProviderError),
}

/// A recorded invocation
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
}

/// Mock provider for testing generation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Reply for models without a dedicated script
    default_reply: MockReply,
    /// Per-model replies
    replies: HashMap<String, MockReply>,
    /// Shared call log, also visible through clones
    calls: Arc<Mutex<Vec<MockCall>>>,
    /// Whether to report credentials as present
    configured: bool,
}

impl MockProvider {
    /// Create a mock provider with the given default reply
    pub fn new(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    /// Every model answers with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Every model fails with `error`
    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockReply::Error(error))
    }

    /// Script the reply of a single model
    pub fn with_model_reply(mut self, model: impl Into<String>, reply: MockReply) -> Self {
        self.replies.insert(model.into(), reply);
        self
    }

    /// Report missing credentials
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Number of invocations so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Model ids in invocation order
    pub fn invoked_models(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.model.clone()).collect()
    }

    /// Prompt of the most recent invocation
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().last().map(|c| c.prompt.clone())
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn invoke(&self, model: &str, prompt: &str) -> Result<RawModelResponse, ProviderError> {
        self.calls.lock().push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        match self.replies.get(model).unwrap_or(&self.default_reply) {
            MockReply::Text(text) => Ok(RawModelResponse::new(text.clone())),
            MockReply::Error(e) => Err(e.clone()),
        }
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        match self.replies.get(model).unwrap_or(&self.default_reply) {
            MockReply::Text(_) => Ok(()),
            MockReply::Error(e) => Err(e.clone()),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
