//! OpenAI backend (Responses API).

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{HttpTransport, LlmBackend, require_u64};
use crate::error::LlmError;
use crate::types::ProviderKind;

/// Talks to `/v1/responses`.
pub struct OpenAiBackend {
    transport: HttpTransport,
    model: String,
}

impl OpenAiBackend {
    pub(crate) fn new(transport: HttpTransport, model: String) -> Self {
        Self { transport, model }
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.transport.api_key())
    }
}

/// First text block of the first output message.
fn extract_text(json: &Value) -> Option<&str> {
    json["output"]
        .as_array()?
        .iter()
        .filter_map(|item| item["content"].as_array())
        .flatten()
        .find_map(|part| part["text"].as_str())
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "input": prompt,
        });
        let auth = self.auth();
        let json = self
            .transport
            .post_json("/v1/responses", &[("Authorization", auth.as_str())], &body)
            .await?;

        extract_text(&json)
            .map(|text| text.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn count_tokens_native(&self, text: &str) -> Result<u64, LlmError> {
        let body = json!({
            "model": self.model,
            "input": text,
        });
        let auth = self.auth();
        let json = self
            .transport
            .post_json(
                "/v1/responses/input_tokens",
                &[("Authorization", auth.as_str())],
                &body,
            )
            .await?;
        require_u64(&json, "/input_tokens")
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_reasoning_items_without_content() {
        let json = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [{"type": "output_text", "text": "  Report  "}]}
            ]
        });
        assert_eq!(extract_text(&json), Some("  Report  "));
    }

    #[test]
    fn no_output_is_none() {
        assert_eq!(extract_text(&json!({"output": []})), None);
        assert_eq!(extract_text(&json!({})), None);
    }
}
