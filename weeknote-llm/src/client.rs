//! LLM Client — one capability trait, one HTTP transport, and the factory
//! that picks the OpenAI, Gemini or Claude backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::claude::ClaudeBackend;
use crate::error::LlmError;
use crate::gemini::GeminiBackend;
use crate::openai::OpenAiBackend;
use crate::types::{ProviderConfig, ProviderKind, TokenCount};

/// What the report pipeline needs from a model provider.
///
/// One request, one response: no retries, no streaming, no conversation
/// state between calls.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Send `prompt` as a single user turn and return the trimmed reply.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Count tokens with the provider's own tokenizer endpoint.
    async fn count_tokens_native(&self, text: &str) -> Result<u64, LlmError>;

    /// Count tokens, degrading to a word-count estimate on failure.
    ///
    /// Never fails. Check [`TokenCount::estimated`]: the fallback is an
    /// approximation that usually understates the real count.
    async fn count_tokens(&self, text: &str) -> TokenCount {
        match self.count_tokens_native(text).await {
            Ok(tokens) => TokenCount::native(tokens),
            Err(e) => {
                warn!(
                    "{} token counting failed, using word-count estimate: {e}",
                    self.provider_name()
                );
                TokenCount::estimate(text)
            }
        }
    }

    /// Model identifier in use.
    fn model_name(&self) -> &str;

    /// Which provider this backend talks to.
    fn provider(&self) -> ProviderKind;

    /// Provider name, e.g. `"openai"`.
    fn provider_name(&self) -> &'static str {
        self.provider().as_str()
    }
}

/// Build the backend selected by `config.kind`.
///
/// No network I/O happens here.
///
/// # Errors
/// Returns [`LlmError::RequestFailed`] if the HTTP client cannot be built.
pub fn create_backend(config: &ProviderConfig) -> Result<Box<dyn LlmBackend>, LlmError> {
    let transport = HttpTransport::new(config)?;
    let model = config.model.clone();
    let backend: Box<dyn LlmBackend> = match config.kind {
        ProviderKind::OpenAi => Box::new(OpenAiBackend::new(transport, model)),
        ProviderKind::Gemini => Box::new(GeminiBackend::new(transport, model)),
        ProviderKind::Claude => {
            Box::new(ClaudeBackend::new(transport, model, config.max_output_tokens))
        }
    };
    Ok(backend)
}

/// Build a backend from a provider name as typed by a user.
///
/// # Errors
/// Returns [`LlmError::UnknownProvider`] for names other than `openai`,
/// `gemini` or `claude`, before anything is constructed.
pub fn create_backend_named(
    provider: &str,
    api_key: impl Into<String>,
    model: impl Into<String>,
) -> Result<Box<dyn LlmBackend>, LlmError> {
    let kind: ProviderKind = provider.parse()?;
    create_backend(&ProviderConfig::new(kind, api_key, model))
}

/// Shared JSON-over-HTTPS plumbing for the provider backends.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub(crate) fn new(config: &ProviderConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.effective_base_url().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// POST `body` to `{base_url}{path}` and return the decoded JSON reply.
    pub(crate) async fn post_json(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let mut request = self.http.post(&url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))
    }
}

/// Read a non-negative integer field, failing with a parse error naming it.
pub(crate) fn require_u64(json: &Value, pointer: &str) -> Result<u64, LlmError> {
    json.pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or_else(|| LlmError::Parse(format!("missing integer field '{pointer}'")))
}
