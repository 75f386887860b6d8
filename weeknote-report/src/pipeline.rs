//! The report pipeline: one linear pass from note listing to upload.
//!
//! ```text
//! list → filter → fetch each (skip failures) → count tokens → budget check
//!      → build prompt → generate → save locally → upload (best effort)
//! ```
//!
//! Everything before the local save is fatal on error except a single
//! note's fetch. After the save, nothing is fatal.

use std::path::PathBuf;

use tracing::{info, warn};
use weeknote_core::{NewNote, NoteContent, NotesApi, build_prompt, filter_by_folder_and_date};
use weeknote_llm::LlmBackend;

use crate::config::RunOptions;
use crate::error::{ReportError, Result};
use crate::output::{report_title, save_local_report};

/// Tag attached to every uploaded report, next to the year tag.
pub const REPORT_TAG: &str = "annual-report";

/// A selected note that could not be included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNote {
    /// Note ID.
    pub id: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Notes that made it into the prompt, with their token total.
#[derive(Debug, Clone, Default)]
pub struct CollectedNotes {
    /// Fetched notes, in selection (chronological) order.
    pub notes: Vec<NoteContent>,
    /// Notes whose fetch failed.
    pub skipped: Vec<SkippedNote>,
    /// Summed token count of `notes`.
    pub total_tokens: u64,
    /// Whether any count in the total is a word-count estimate.
    pub estimated: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Where the report was saved.
    pub local_path: PathBuf,
    /// Share URL, when the upload worked.
    pub uploaded_url: Option<String>,
    /// Upload failure message, when it did not.
    pub upload_error: Option<String>,
    /// Number of notes in the prompt.
    pub notes_included: usize,
    /// Notes left out because they could not be fetched.
    pub skipped: Vec<SkippedNote>,
    /// Token total checked against the budget.
    pub total_tokens: u64,
}

/// Fetch each selected note and count its tokens.
///
/// A note that fails to fetch (including one with empty content) is logged
/// and skipped; the rest carry on.
pub async fn collect_notes(
    notes_api: &dyn NotesApi,
    llm: &dyn LlmBackend,
    ids: impl IntoIterator<Item = &str>,
) -> CollectedNotes {
    let mut collected = CollectedNotes::default();

    for id in ids {
        match notes_api.fetch_content(id).await {
            Ok(note) => {
                let count = llm.count_tokens(&note.content).await;
                collected.total_tokens += count.tokens;
                collected.estimated |= count.estimated;
                info!(
                    "  Note '{}' - {} tokens{}",
                    note.display_title(),
                    count.tokens,
                    if count.estimated { " (estimated)" } else { "" }
                );
                collected.notes.push(note);
            }
            Err(e) => {
                warn!("Error processing note {id}: {e}");
                collected.skipped.push(SkippedNote {
                    id: id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    collected
}

/// Fail when `total` is over `limit`. Equal is allowed.
///
/// # Errors
/// Returns [`ReportError::TokenBudgetExceeded`].
pub fn check_token_budget(total: u64, limit: u64) -> Result<()> {
    if total > limit {
        return Err(ReportError::TokenBudgetExceeded { total, limit });
    }
    Ok(())
}

/// Run the whole pipeline.
///
/// # Errors
/// Any fatal step: listing or filtering notes, the token budget,
/// generation, or the local save.
pub async fn run(
    options: &RunOptions,
    notes_api: &dyn NotesApi,
    llm: &dyn LlmBackend,
) -> Result<ReportOutcome> {
    let criteria = &options.criteria;

    info!("Fetching notes from HackMD...");
    let all_notes = notes_api.list_notes().await?;
    info!("Found {} notes total", all_notes.len());

    info!("Filtering notes...");
    let selected = filter_by_folder_and_date(&all_notes, criteria)?;
    info!(
        "Found {} notes in folder '{}' between {} and {}",
        selected.len(),
        criteria.folder_name,
        criteria.start_date,
        criteria.end_date
    );

    info!("Retrieving full content and calculating tokens...");
    let collected = collect_notes(notes_api, llm, selected.iter().map(|n| n.id.as_str())).await;
    if collected.notes.is_empty() {
        warn!(
            "None of the {} selected notes could be fetched; the prompt has no note content",
            collected.skipped.len()
        );
    }

    info!("Total tokens: {}", collected.total_tokens);
    if collected.estimated {
        warn!("Token total includes word-count estimates and may understate real usage");
    }
    check_token_budget(collected.total_tokens, options.max_tokens)?;

    info!("Building prompt for LLM...");
    let prompt = build_prompt(&collected.notes);

    info!(
        "Generating report with {} ({})...",
        llm.provider_name(),
        llm.model_name()
    );
    let report = llm.generate(&prompt).await.map_err(ReportError::Generation)?;

    info!("Saving report locally...");
    let local_path = save_local_report(
        &options.reports_dir,
        &report,
        &criteria.start_date,
        &criteria.end_date,
    )?;
    info!("Report saved to: {}", local_path.display());

    info!("Uploading to HackMD...");
    let tags = [REPORT_TAG.to_string(), options.year_tag.clone()];
    let note = NewNote::private(
        report_title(&criteria.start_date, &criteria.end_date),
        &report,
        &tags,
    );
    let (uploaded_url, upload_error) = match notes_api.create_note(&note).await {
        Ok(url) => {
            info!("Report uploaded to HackMD: {url}");
            (Some(url), None)
        }
        Err(e) => {
            warn!("Failed to upload to HackMD, but local file was saved: {e}");
            (None, Some(e.to_string()))
        }
    };

    info!("Report generation completed successfully!");
    Ok(ReportOutcome {
        local_path,
        uploaded_url,
        upload_error,
        notes_included: collected.notes.len(),
        skipped: collected.skipped,
        total_tokens: collected.total_tokens,
    })
}
