//! What the command prints, and the status it exits with, once a run ends.

use std::fmt::Display;
use std::process::ExitCode;

use crate::pipeline::ReportOutcome;

/// Exit status when a report was saved, even if the upload failed.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for every fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Console output and exit status of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines for stdout.
    pub stdout: Vec<String>,
    /// Lines for stderr.
    pub stderr: Vec<String>,
    /// Process exit status.
    pub exit_status: u8,
}

impl RunSummary {
    /// Summary of a run that saved its report.
    #[must_use]
    pub fn completed(outcome: &ReportOutcome) -> Self {
        let mut stdout = vec![format!("Report saved to: {}", outcome.local_path.display())];
        match (&outcome.uploaded_url, &outcome.upload_error) {
            (Some(url), _) => stdout.push(format!("Report uploaded to HackMD: {url}")),
            (None, Some(e)) => stdout.push(format!(
                "Warning: Failed to upload to HackMD, but local file was saved: {e}"
            )),
            (None, None) => {}
        }
        if !outcome.skipped.is_empty() {
            stdout.push(format!(
                "Skipped {} of {} notes that could not be fetched",
                outcome.skipped.len(),
                outcome.skipped.len() + outcome.notes_included
            ));
        }
        Self {
            stdout,
            stderr: Vec::new(),
            exit_status: EXIT_SUCCESS,
        }
    }

    /// Summary of a fatal error: one `Error: ...` line on stderr.
    ///
    /// Multi-line messages (an HTTP body, say) are folded onto that line.
    pub fn failed(error: impl Display) -> Self {
        let message = error.to_string();
        let folded = message
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            stdout: Vec::new(),
            stderr: vec![format!("Error: {folded}")],
            exit_status: EXIT_FAILURE,
        }
    }

    /// Print the lines and hand back the exit code.
    #[must_use]
    pub fn emit(&self) -> ExitCode {
        for line in &self.stdout {
            println!("{line}");
        }
        for line in &self.stderr {
            eprintln!("{line}");
        }
        ExitCode::from(self.exit_status)
    }
}
