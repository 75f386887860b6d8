//! # weeknote-report — Annual Reports from HackMD Weekly Notes
//!
//! Glue between `weeknote-core` (notes) and `weeknote-llm` (models), plus
//! the command line surface.
//!
//! ## Modules
//!
//! - `config` — CLI flags, environment credentials, TOML settings
//! - `pipeline` — the sequential report run
//! - `output` — local report file naming and persistence
//! - `summary` — console lines and exit status of a finished run
//! - `error` — the fatal error taxonomy of a run

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod summary;

pub use config::{Cli, ReportConfig, RunOptions, Settings};
pub use error::ReportError;
pub use pipeline::{ReportOutcome, run};
pub use summary::RunSummary;
