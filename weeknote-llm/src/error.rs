//! LLM error types.

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// Provider answered with a non-success status.
    #[error("LLM provider returned HTTP {status}: {body}")]
    Http {
        status: u16,
        body: String,
    },

    /// LLM response was not valid JSON or lacked the expected fields.
    #[error("Failed to parse LLM response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("LLM request timed out")]
    Timeout,

    /// LLM provider is unreachable.
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    /// Provider name not one of the supported backends.
    #[error("Unsupported LLM provider: {0}")]
    UnknownProvider(String),

    /// An OpenAI or Claude reply had no text block.
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else if err.is_decode() {
            LlmError::Parse(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
