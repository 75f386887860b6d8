//! # WEEKNOTE Core Library
//!
//! The notes side of report generation:
//!
//! - **Gateway** — [`NotesApi`] over the HackMD REST API ([`HackMdClient`])
//! - **Filter** — folder + inclusive date-range selection, chronological order
//! - **Prompt** — the fixed report template with one section per weekly note
//!
//! Nothing here talks to an LLM; see `weeknote-llm` for that.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod filter;
pub mod hackmd;
pub mod prompt;
pub mod types;

pub use error::NotesError;
pub use filter::{FilterCriteria, filter_by_folder_and_date};
pub use hackmd::{HackMdClient, NotesApi};
pub use prompt::build_prompt;
pub use types::*;
