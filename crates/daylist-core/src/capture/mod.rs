//! Transcript-to-task extraction via the Gemini API.
//!
//! The caller supplies a free-form transcript (speech recognition
//! happens elsewhere); the model is asked for a strict JSON array of
//! `{title, description, estimatedTime}` items. Model output is
//! parsed directly first, then through a permissive bracket
//! extraction; anything else is a distinct parse failure.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::CaptureError;
use crate::storage::config::GeminiConfig;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Estimates outside this range are clamped to the prompt contract.
const MIN_ESTIMATE_MIN: u32 = 5;
const MAX_ESTIMATE_MIN: u32 = 180;

/// A task extracted from a transcript, ready for creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated minutes.
    #[serde(default)]
    pub estimated_time: Option<u32>,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build from config; the API key falls back to the
    /// `GEMINI_API_KEY` environment variable.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, CaptureError> {
        let api_key = resolve_api_key(config);
        if api_key.is_empty() {
            return Err(CaptureError::MissingApiKey);
        }
        Ok(Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Point the client at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Extract actionable tasks from a transcript. An empty array is
    /// a valid outcome, not an error.
    pub async fn extract_tasks(&self, transcript: &str) -> Result<Vec<CapturedTask>, CaptureError> {
        let content = self.generate_text(&extraction_prompt(transcript)).await?;
        parse_tasks(&content)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, CaptureError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(CaptureError::Api {
                status: status.as_u16(),
                message: body_text,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body_text).map_err(|_| CaptureError::EmptyResponse)?;
        parsed
            .candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_ref())
            .find(|text| !text.trim().is_empty())
            .map(|text| text.trim().to_string())
            .ok_or(CaptureError::EmptyResponse)
    }
}

/// The extraction prompt. The 5-180 minute range here is also
/// enforced on the parsed result.
fn extraction_prompt(transcript: &str) -> String {
    format!(
        "Extract actionable tasks from the following text. Return ONLY a JSON array \
of tasks in this exact format:\n\
[{{\"title\": \"task title\", \"description\": \"brief description\", \"estimatedTime\": number_in_minutes}}]\n\n\
Rules:\n\
- Each task should be a clear, actionable item\n\
- Keep titles concise but descriptive\n\
- Estimate time in minutes (5-180 range)\n\
- If no clear tasks, return empty array []\n\
- Do not include any other text or explanation\n\n\
Text: \"{transcript}\""
    )
}

/// Parse model output into tasks: direct JSON first, then the
/// bracket-extraction fallback for responses wrapped in prose or
/// code fences.
pub fn parse_tasks(content: &str) -> Result<Vec<CapturedTask>, CaptureError> {
    let trimmed = content.trim();
    let parsed: Vec<CapturedTask> = serde_json::from_str(trimmed)
        .or_else(|_| {
            extract_json_array(trimmed)
                .ok_or(CaptureError::Parse)
                .and_then(|raw| serde_json::from_str(raw).map_err(|_| CaptureError::Parse))
        })?;

    Ok(parsed
        .into_iter()
        .filter(|task| !task.title.trim().is_empty())
        .map(|mut task| {
            task.estimated_time = task
                .estimated_time
                .map(|minutes| minutes.clamp(MIN_ESTIMATE_MIN, MAX_ESTIMATE_MIN));
            task
        })
        .collect())
}

fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn resolve_api_key(config: &GeminiConfig) -> String {
    if !config.api_key.trim().is_empty() {
        return config.api_key.trim().to_string();
    }
    std::env::var("GEMINI_API_KEY").unwrap_or_default()
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
