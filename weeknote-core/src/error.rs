//! Error types for the notes gateway and filter.

use thiserror::Error;

/// Errors raised while reading, filtering or writing notes.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Transport-level failure talking to the notes service.
    #[error("Notes gateway request failed: {0}")]
    Gateway(String),

    /// The notes service answered with a non-success status.
    #[error("Notes gateway returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse notes gateway response: {0}")]
    Parse(String),

    /// A fetched note had no usable content.
    #[error("Note content is empty - [Note ID: {id}, Title: {title}]")]
    EmptyContent {
        /// Note ID.
        id: String,
        /// Note title, `Untitled` when the service sent none.
        title: String,
    },

    /// A date bound was not a `YYYY-MM-DD` string.
    #[error("Invalid date format: {input}. Expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// No note matched the folder and date range.
    #[error("No notes found in folder '{folder}' between {start} and {end}")]
    NoMatch {
        /// Folder name searched for.
        folder: String,
        /// Inclusive start date.
        start: String,
        /// Inclusive end date.
        end: String,
    },
}

impl From<reqwest::Error> for NotesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NotesError::Parse(err.to_string())
        } else {
            NotesError::Gateway(err.to_string())
        }
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, NotesError>;
