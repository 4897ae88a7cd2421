use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use quiz_core::ingest::{IngestReport, RowIssue, Validator};
use quiz_core::model::{Difficulty, QuestionDraft};

use crate::error::GeneratorError;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Client for an OpenAI-compatible chat endpoint that writes new questions.
///
/// Its output is untrusted and goes through the same validator as the table.
#[derive(Clone)]
pub struct QuestionGenerator {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl QuestionGenerator {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Request `count` questions at `difficulty` and validate the reply.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` when the service is disabled, the request fails,
    /// or the response is empty or not a JSON array of question objects.
    pub async fn generate(
        &self,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<IngestReport, GeneratorError> {
        let config = self.config.as_ref().ok_or(GeneratorError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(count, difficulty),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GeneratorError::EmptyResponse)?;

        let report = parse_generated(&content, difficulty)?;
        info!(
            requested = count,
            accepted = report.questions.len(),
            rejected = report.diagnostics.len(),
            "generated questions validated"
        );
        Ok(report)
    }
}

fn build_prompt(count: usize, difficulty: Difficulty) -> String {
    format!(
        "Generate {count} English \"Build a Sentence\" tasks for {difficulty} students.\n\
         Each task has:\n\
         - context: a question or statement from Person A.\n\
         - template: Person B's reply with one blank (_____) per missing word.\n\
         - scrambledWords: the missing words, exactly one per blank, in any order.\n\
         - correctSentence: Person B's full, grammatically correct reply.\n\
         - distractor: ONE extra plausible word that is NOT used in the reply.\n\
         Return only a JSON array of objects with keys: id, context, template, \
         scrambledWords, correctSentence, distractor."
    )
}

/// Shape of one generated record. Missing keys become empty values and are
/// rejected by validation rather than by deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GeneratedQuestion {
    context: String,
    template: String,
    scrambled_words: Vec<String>,
    correct_sentence: String,
    distractor: String,
}

/// Validate a generated JSON array.
///
/// Each element is read on its own, so one unreadable record is reported and
/// skipped like a malformed table row. Ids are reassigned as `q-<index>` and
/// every record takes the requested difficulty. Row numbers in diagnostics are
/// 1-based array positions.
///
/// # Errors
///
/// Returns `GeneratorError::Payload` if `content` is not a JSON array.
pub fn parse_generated(
    content: &str,
    difficulty: Difficulty,
) -> Result<IngestReport, GeneratorError> {
    let json = strip_code_fence(content);
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| GeneratorError::Payload(e.to_string()))?;

    let mut validator = Validator::new();
    for (index, value) in records.into_iter().enumerate() {
        let row = index + 1;
        let record = match serde_json::from_value::<GeneratedQuestion>(value) {
            Ok(record) => record,
            Err(e) => {
                validator.reject(row, None, RowIssue::Record(e.to_string()));
                continue;
            }
        };
        let draft = QuestionDraft {
            id: format!("q-{index}"),
            context: record.context,
            template: record.template,
            scrambled_words: record.scrambled_words,
            correct_sentence: record.correct_sentence,
            distractor: record.distractor,
            difficulty: Some(difficulty.label().to_string()),
        };
        validator.submit(row, draft);
    }
    Ok(validator.finish())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
