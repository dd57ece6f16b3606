use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, RawModelResponse};

/// Default public endpoint of the generative-language API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Gemini client for the `generateContent` REST call
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (defaults to the public API when empty)
    endpoint: String,
    /// Sampling temperature sent with every request
    temperature: Option<f32>,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gemini")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "<missing>" } else { "<set>" })
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// generateContent request body
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// A conversation turn
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// One part of a turn; only text parts are used
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// Sampling options
#[derive(Debug, Serialize)]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A candidate completion
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

impl GeminiRequest {
    /// Single user turn carrying `prompt`
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config: None,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.generation_config = temperature.map(|t| GeminiGenerationConfig { temperature: Some(t) });
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            temperature: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// URL of the generateContent call for `model`; bare ids get the `models/` prefix
    pub fn generate_url(&self, model: &str) -> Result<Url, ProviderError> {
        let base = if self.endpoint.is_empty() { DEFAULT_ENDPOINT } else { self.endpoint.as_str() };
        let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", base, e)))?;

        let model = model.trim_start_matches('/');
        let model = if model.starts_with("models/") { model.to_string() } else { format!("models/{}", model) };

        base.join(&format!("v1beta/{}:generateContent", model))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid model id {}: {}", model, e)))
    }

    /// Complete a generateContent request
    pub async fn complete(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError("API key missing".to_string()));
        }

        let url = self.generate_url(model)?;
        let response = self.client.post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Gemini API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}) for {}: {}", status, model, error_text);
            return Err(Self::classify_status(status, error_text));
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e)))
    }

    /// Map a non-success status onto the provider error taxonomy
    pub fn classify_status(status: StatusCode, message: String) -> ProviderError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(format!("429 {}", message)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
            _ => ProviderError::ApiError { status_code: status.as_u16(), message },
        }
    }

    /// Extract text from the first candidate
    pub fn extract_text_from_response(response: &GeminiResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn invoke(&self, model: &str, prompt: &str) -> Result<RawModelResponse, ProviderError> {
        let request = GeminiRequest::new(prompt).temperature(self.temperature);
        let response = self.complete(model, &request).await?;

        match Self::extract_text_from_response(&response) {
            Some(text) => Ok(RawModelResponse::new(text)),
            None => {
                let reason = response.candidates.first()
                    .and_then(|c| c.finish_reason.clone())
                    .unwrap_or_else(|| "no candidates".to_string());
                Err(ProviderError::ParseError(format!("Gemini response contained no text ({})", reason)))
            }
        }
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        self.invoke(model, "Hello").await.map(|_| ())
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
