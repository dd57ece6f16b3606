/*!
 * Prompt templates for summary, question and moderation requests.
 *
 * Each template asks the model for a bare JSON object of a fixed shape.
 * Rendering is deterministic for a given task, parameter set and text.
 */

use super::models::GenerationParams;

/// Prompt template with `{placeholder}` variables
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const SUMMARY: &'static str = r#"Summarize the following academic notes. Return ONLY JSON.
{
  "short_summary": "3-5 lines",
  "detailed_summary": ["bullet", "point"]
}

Text:
{text}"#;

    pub const QUESTIONS: &'static str = r#"Generate EXACTLY {count} {mode} questions based on the text.
Marks per question: {marks}

FOR SUBJECTIVE: You MUST include a concise answer for each question.
FOR OBJECTIVE: Include 4 options and the correct answer.

Return ONLY JSON:
{
  "questions": [
    {
      "type": "{mode}",
      "marks": {marks_json},
      "question": "<text>",
      "options": ["A", "B", "C", "D"] (null for subjective),
      "answer": "<correct answer or subjective explanation>"
    }
  ]
}

Text:
{text}"#;

    pub const SAFETY: &'static str = r#"You are a content safety moderator for an academic platform.
Analyze the following text for:
- Offensive, abusive, hateful, violent, explicit, discriminatory, political, or harmful content.
- Irrelevant or non-academic material.

Return ONLY a JSON object with this format:
{
  "status": "approved" | "rejected",
  "reason": "<short explanation>"
}

Text to Analyze:
{text}"#;

    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Substitute `{name}` for each pair, in order
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(self.template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
    }
}

/// Render the summary prompt for already truncated text
pub fn summary_prompt(text: &str) -> String {
    PromptTemplate::new(PromptTemplate::SUMMARY).render(&[("text", text)])
}

/// Render the question prompt for already truncated text
pub fn questions_prompt(text: &str, params: &GenerationParams) -> String {
    let mode = params.mode.to_string();
    let count = params.count.to_string();
    let (marks, marks_json) = match params.marks {
        Some(m) => (m.to_string(), m.to_string()),
        None => ("N/A".to_string(), "null".to_string()),
    };

    // `text` goes last so note content cannot inject placeholders
    PromptTemplate::new(PromptTemplate::QUESTIONS).render(&[
        ("count", count.as_str()),
        ("mode", mode.as_str()),
        ("marks_json", marks_json.as_str()),
        ("marks", marks.as_str()),
        ("text", text),
    ])
}

/// Render the moderation prompt for already truncated text
pub fn safety_prompt(text: &str) -> String {
    PromptTemplate::new(PromptTemplate::SAFETY).render(&[("text", text)])
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
