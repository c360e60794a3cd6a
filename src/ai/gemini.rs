// ai/gemini.rs

use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Generation can legitimately take a while on large property batches.
const GEMINI_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug)]
pub enum GeminiError {
    Request(String),
    Api { status: u16, body: String },
    EmptyResponse,
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::Request(msg) => write!(f, "gemini request failed: {msg}"),
            GeminiError::Api { status, body } => write!(f, "gemini api error {status}: {body}"),
            GeminiError::EmptyResponse => write!(f, "gemini returned no candidates"),
        }
    }
}

impl std::error::Error for GeminiError {}

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(GEMINI_TIMEOUT)
            .build()
            .map_err(|e| GeminiError::Request(e.to_string()))?;
        Ok(Self { client, api_key })
    }

    /// Single-turn generation in JSON response mode. Returns the raw text of
    /// the first candidate; callers parse and validate it.
    pub fn generate_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_MODEL}:generateContent?key={}",
            self.api_key
        );
        let payload = json!({
            "contents": [
                {
                    "parts": [
                        { "text": system_prompt },
                        { "text": user_prompt }
                    ]
                }
            ],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| GeminiError::Request(e.to_string()))?;
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(GeminiError::EmptyResponse)
    }
}

/// Models sometimes wrap JSON-mode output in a markdown fence anyway.
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    for opener in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(opener) {
            if let Some(end) = rest.rfind("```") {
                return rest[..end].trim();
            }
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_json_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn unclosed_fence_falls_back_to_trim() {
        assert_eq!(strip_json_fence("```json {\"a\":1}"), "```json {\"a\":1}");
    }
}
