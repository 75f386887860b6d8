//! Top-level error type for a report run.

use std::path::PathBuf;

use thiserror::Error;
use weeknote_core::NotesError;
use weeknote_llm::LlmError;

/// Every way a report run can fail.
///
/// All of these are fatal. The two recoverable cases (one note failing to
/// fetch, the final upload failing) never become a `ReportError`; the
/// pipeline records them in its outcome instead.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Missing or invalid credentials, flags or settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Notes service failure, bad date, or empty selection.
    #[error(transparent)]
    Notes(#[from] NotesError),

    /// The model call failed.
    #[error("Report generation failed: {0}")]
    Generation(#[source] LlmError),

    /// Selected notes exceed the token budget; nothing was sent to the model.
    #[error("Total token count ({total}) exceeds limit ({limit})")]
    TokenBudgetExceeded {
        /// Summed token count of the fetched notes.
        total: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// The report could not be written locally.
    #[error("Failed to write local file {}: {source}", .path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl From<LlmError> for ReportError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::UnknownProvider(_) => ReportError::Configuration(err.to_string()),
            other => ReportError::Generation(other),
        }
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ReportError>;
