//! Gemini `generateContent` adapter

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scout_application::{GenerationError, TextGenerator};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

const API_PATH: &str = "v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiTextGenerator`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// [`TextGenerator`] backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiTextGenerator {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiTextGenerator {
    pub fn new(settings: GeminiSettings) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            http,
            base_url: settings.base_url,
            model: settings.model,
            api_key: settings.api_key,
        })
    }

    fn build_model_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{API_PATH}/{}:generateContent", self.model)
    }

    fn require_api_key(&self) -> Result<&str, GenerationError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::Rejected("missing API key".to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, GenerationError> {
        let api_key = self.require_api_key()?;
        let payload = build_payload(prompt, system_instruction);

        info!(
            model = self.model.as_str(),
            prompt_chars = prompt.len(),
            "Sending request to Gemini"
        );

        let response = self
            .http
            .post(self.build_model_url())
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        debug!("Received response from Gemini");
        extract_text(&body)
    }
}

fn build_payload(prompt: &str, system_instruction: Option<&str>) -> Value {
    let mut payload = json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}]
        }]
    });
    if let Some(system) = system_instruction {
        payload["system_instruction"] = json!({
            "parts": [{"text": system}]
        });
    }
    payload
}

/// Error text never carries the request URL.
fn transport_error(e: reqwest::Error) -> GenerationError {
    let e = e.without_url();
    if e.is_decode() {
        GenerationError::InvalidResponse(e.to_string())
    } else {
        GenerationError::Unavailable(e.to_string())
    }
}

/// Map a non-success HTTP status to a generation error.
fn classify_status(status: StatusCode, body: &str) -> GenerationError {
    let detail = error_message(body).unwrap_or_else(|| status.to_string());
    if status == StatusCode::TOO_MANY_REQUESTS {
        GenerationError::Quota(detail)
    } else if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
        GenerationError::Unavailable(detail)
    } else {
        GenerationError::Rejected(detail)
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"].as_str().map(str::to_string)
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    let candidate = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => GenerationError::Rejected(format!("prompt blocked: {reason}")),
            None => GenerationError::InvalidResponse("no candidates".to_string()),
        })?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(GenerationError::InvalidResponse("missing text".to_string()));
    }
    Ok(text)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}
