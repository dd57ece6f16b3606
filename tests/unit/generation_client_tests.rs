/*!
 * Tests for the generation client's model fallback loop
 */

use std::sync::Arc;

use notestack::app_config::GenerationConfig;
use notestack::errors::ProviderError;
use notestack::generation::client::{MISSING_KEY_MESSAGE, RATE_LIMITED_MESSAGE};
use notestack::generation::{FailureKind, GenerationClient, GenerationParams, GenerationResult, QuestionMode, TaskKind};
use notestack::providers::mock::{MockProvider, MockReply};

const QUESTIONS: &str = r#"{"questions": [
    {"type": "subjective", "marks": 5, "question": "Explain the water cycle.", "answer": "Evaporation, condensation, precipitation."},
    {"type": "subjective", "marks": 5, "question": "Define transpiration.", "answer": "Water loss from leaves."}
]}"#;

fn client(provider: &MockProvider, models: &[&str]) -> GenerationClient {
    let config = GenerationConfig {
        models: models.iter().map(|m| m.to_string()).collect(),
        ..GenerationConfig::default()
    };
    GenerationClient::new(Arc::new(provider.clone()), &config)
}

/// Test a 429 on the first model stops after exactly one call
#[tokio::test]
async fn test_generate_withRateLimitOnFirstModel_shouldMakeOneCall() {
    let provider = MockProvider::failing(ProviderError::ApiError { status_code: 429, message: "quota".into() });
    let result = client(&provider, &["m1", "m2", "m3", "m4"])
        .generate(TaskKind::Questions, "notes", &GenerationParams::default())
        .await;

    assert_eq!(provider.call_count(), 1);
    assert_eq!(
        result,
        GenerationResult::Error { kind: FailureKind::RateLimited, message: RATE_LIMITED_MESSAGE.to_string() }
    );
}

/// Test a rate limit hidden in the error text still stops the loop
#[tokio::test]
async fn test_generate_withRateLimitInMessage_shouldStop() {
    let provider = MockProvider::replying(QUESTIONS)
        .with_model_reply("m1", MockReply::Error(ProviderError::ConnectionError("HTTP 429 Too Many Requests".into())));
    let result = client(&provider, &["m1", "m2"])
        .generate_questions("notes", &GenerationParams::default())
        .await;

    assert!(result.is_rate_limited());
    assert_eq!(provider.invoked_models(), vec!["m1"]);
}

/// Test the third model wins after two unparseable answers
#[tokio::test]
async fn test_generateQuestions_withThirdModelValid_shouldReturnItsAnswer() {
    let provider = MockProvider::replying(QUESTIONS)
        .with_model_reply("m1", MockReply::Text("no json here".into()))
        .with_model_reply("m2", MockReply::Error(ProviderError::ParseError("empty candidate".into())));
    let params = GenerationParams::new(QuestionMode::Subjective, Some(5), 2);
    let result = client(&provider, &["m1", "m2", "m3", "m4"]).generate_questions("notes", &params).await;

    assert_eq!(result.as_questions().map(|s| s.questions.len()), Some(2));
    assert_eq!(provider.invoked_models(), vec!["m1", "m2", "m3"]);
}

/// Test exhaustion keeps the expected shapes
#[tokio::test]
async fn test_generate_withAllModelsUnparseable_shouldDegradeToShape() {
    let provider = MockProvider::replying("still not json");
    let c = client(&provider, &["m1", "m2"]);

    let summary = c.summarize("notes").await;
    let questions = c.generate_questions("notes", &GenerationParams::default()).await;

    let summary = summary.as_summary().unwrap();
    assert!(summary.short_summary.starts_with("Generation failed. Error:"));
    assert!(summary.detailed_summary.is_empty());
    assert!(questions.as_questions().unwrap().questions.is_empty());
    assert_eq!(provider.call_count(), 4);
}

/// Test a missing API key skips every model
#[tokio::test]
async fn test_summarize_withUnconfiguredProvider_shouldReportMissingKey() {
    let provider = MockProvider::replying(QUESTIONS).unconfigured();
    let result = client(&provider, &["m1"]).summarize("notes").await;

    assert_eq!(result.as_summary().unwrap().short_summary, MISSING_KEY_MESSAGE);
    assert_eq!(provider.call_count(), 0);
}

/// Test question prompts carry the requested parameters
#[tokio::test]
async fn test_generateQuestions_shouldRenderParametersIntoPrompt() {
    let provider = MockProvider::replying(QUESTIONS);
    let params = GenerationParams::new(QuestionMode::Subjective, Some(5), 2);
    client(&provider, &["m1"]).generate_questions("The water cycle.", &params).await;

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("Generate EXACTLY 2 subjective questions"));
    assert!(prompt.contains("The water cycle."));
}

/// Test the result serializes with the shape of its variant
#[tokio::test]
async fn test_generationResult_shouldSerializeUntagged() {
    let provider = MockProvider::replying(QUESTIONS);
    let result = client(&provider, &["m1"]).generate_questions("notes", &GenerationParams::default()).await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["questions"].as_array().map(|q| q.len()), Some(2));
    assert_eq!(json["questions"][0]["type"], "subjective");
}
