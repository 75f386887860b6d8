//! Core types for provider selection and token accounting.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI Responses API.
    OpenAi,
    /// Google Gemini API.
    Gemini,
    /// Anthropic Messages API.
    Claude,
}

impl ProviderKind {
    /// All providers, in CLI order.
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Gemini, Self::Claude];

    /// Name as used on the command line and in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
        }
    }

    /// Prefix of this provider's environment variables (`OPENAI`, ...).
    #[must_use]
    pub fn env_prefix(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI",
            Self::Gemini => "GEMINI",
            Self::Claude => "CLAUDE",
        }
    }

    /// Name of the API key variable, e.g. `CLAUDE_API_KEY`.
    #[must_use]
    pub fn api_key_var(self) -> String {
        format!("{}_API_KEY", self.env_prefix())
    }

    /// Name of the model variable, e.g. `CLAUDE_MODEL`.
    #[must_use]
    pub fn model_var(self) -> String {
        format!("{}_MODEL", self.env_prefix())
    }

    /// Public API endpoint.
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Claude => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "claude" => Ok(Self::Claude),
            _ => Err(LlmError::UnknownProvider(s.to_string())),
        }
    }
}

/// Everything needed to build a backend. Resolved once at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Which provider.
    pub kind: ProviderKind,
    /// API key for that provider.
    pub api_key: String,
    /// Model identifier, passed through verbatim.
    pub model: String,
    /// Endpoint override; `None` uses [`ProviderKind::default_base_url`].
    pub base_url: Option<String>,
    /// Per-request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// Output token cap, for providers that require one (Claude).
    pub max_output_tokens: u32,
}

impl ProviderConfig {
    /// Default output cap sent to Claude.
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 16 * 1024;

    /// Config with default endpoint, timeout and output cap.
    #[must_use]
    pub fn new(kind: ProviderKind, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: None,
            max_output_tokens: Self::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Point the backend at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL in effect, without a trailing `/`.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
            .trim_end_matches('/')
    }
}

/// Result of counting tokens.
///
/// When `estimated` is true the provider's tokenizer could not be reached
/// and `tokens` is a whitespace word count instead. That is a rough
/// estimate, not an equivalent measure: for most text (and for CJK text
/// without spaces in particular) it undercounts real tokens, so a budget
/// check against it can pass when the real count would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCount {
    /// Token count (or word-count estimate).
    pub tokens: u64,
    /// Whether this is the word-count fallback.
    pub estimated: bool,
}

impl TokenCount {
    /// Count reported by the provider's tokenizer.
    #[must_use]
    pub fn native(tokens: u64) -> Self {
        Self { tokens, estimated: false }
    }

    /// Whitespace word-count estimate of `text`.
    #[must_use]
    pub fn estimate(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().count() as u64,
            estimated: true,
        }
    }
}
