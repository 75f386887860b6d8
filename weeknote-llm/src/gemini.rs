//! Google Gemini backend (`generateContent` / `countTokens`).

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{HttpTransport, LlmBackend, require_u64};
use crate::error::LlmError;
use crate::types::ProviderKind;

/// Talks to `/v1beta/models/{model}:generateContent`.
pub struct GeminiBackend {
    transport: HttpTransport,
    model: String,
}

impl GeminiBackend {
    pub(crate) fn new(transport: HttpTransport, model: String) -> Self {
        Self { transport, model }
    }

    fn endpoint(&self, method: &str) -> String {
        // Accept both "gemini-x" and "models/gemini-x".
        let model = self.model.trim_start_matches("models/");
        format!("/v1beta/models/{model}:{method}")
    }

    fn contents(text: &str) -> Value {
        json!([{ "role": "user", "parts": [{ "text": text }] }])
    }
}

/// All text parts of the first candidate, concatenated.
///
/// A reply without candidates (e.g. a blocked prompt) yields an empty string.
fn extract_text(json: &Value) -> String {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default()
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({
            "contents": Self::contents(prompt),
            "generationConfig": {
                "thinkingConfig": { "thinkingLevel": "HIGH" }
            }
        });
        let json = self
            .transport
            .post_json(
                &self.endpoint("generateContent"),
                &[("x-goog-api-key", self.transport.api_key())],
                &body,
            )
            .await?;

        Ok(extract_text(&json).trim().to_string())
    }

    async fn count_tokens_native(&self, text: &str) -> Result<u64, LlmError> {
        let body = json!({ "contents": Self::contents(text) });
        let json = self
            .transport
            .post_json(
                &self.endpoint("countTokens"),
                &[("x-goog-api-key", self.transport.api_key())],
                &body,
            )
            .await?;
        require_u64(&json, "/totalTokens")
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }
}
