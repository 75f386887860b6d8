//! # weeknote-llm — LLM Abstraction Layer for WEEKNOTE
//!
//! Provides one interface, [`LlmBackend`], over three hosted providers:
//!   - **OpenAI** (Responses API)
//!   - **Gemini** (Generative Language API)
//!   - **Claude** (Anthropic Messages API)
//!
//! The backend is picked once at startup from a provider name; an unknown
//! name fails before any network activity.
//!
//! # Capabilities
//!
//! ```text
//! generate(prompt)       -> trimmed text     (one request, no retry)
//! count_tokens(text)     -> TokenCount       (native, else word-count estimate)
//! model_name / provider  -> accessors        (no I/O)
//! ```

pub mod claude;
pub mod client;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod types;

pub use client::{LlmBackend, create_backend, create_backend_named};
pub use error::LlmError;
pub use types::{ProviderConfig, ProviderKind, TokenCount};
