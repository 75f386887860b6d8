//! Anthropic Claude backend (Messages API).

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{HttpTransport, LlmBackend, require_u64};
use crate::error::LlmError;
use crate::types::ProviderKind;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Talks to `/v1/messages`.
pub struct ClaudeBackend {
    transport: HttpTransport,
    model: String,
    max_output_tokens: u32,
}

impl ClaudeBackend {
    pub(crate) fn new(transport: HttpTransport, model: String, max_output_tokens: u32) -> Self {
        Self {
            transport,
            model,
            max_output_tokens,
        }
    }

    fn messages(text: &str) -> Value {
        json!([{ "role": "user", "content": text }])
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, LlmError> {
        self.transport
            .post_json(
                path,
                &[
                    ("x-api-key", self.transport.api_key()),
                    ("anthropic-version", ANTHROPIC_VERSION),
                ],
                body,
            )
            .await
    }
}

/// First `text` content block.
fn extract_text(json: &Value) -> Option<&str> {
    json["content"]
        .as_array()?
        .iter()
        .find_map(|block| block["text"].as_str())
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_output_tokens,
            "messages": Self::messages(prompt),
        });
        let json = self.post("/v1/messages", &body).await?;

        extract_text(&json)
            .map(|text| text.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn count_tokens_native(&self, text: &str) -> Result<u64, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": Self::messages(text),
        });
        let json = self.post("/v1/messages/count_tokens", &body).await?;
        require_u64(&json, "/input_tokens")
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> ProviderKind {
        ProviderKind::Claude
    }
}
