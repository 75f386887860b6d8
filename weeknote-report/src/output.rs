//! Local report persistence.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReportError, Result};

/// Prefix shared by the report file name and the uploaded note title.
pub const REPORT_NAME_PREFIX: &str = "年度績效報告";

/// Title for a report covering `start..=end`.
#[must_use]
pub fn report_title(start_date: &str, end_date: &str) -> String {
    format!("{REPORT_NAME_PREFIX}_{start_date}_to_{end_date}")
}

/// File name for a report covering `start..=end`.
#[must_use]
pub fn report_file_name(start_date: &str, end_date: &str) -> String {
    format!("{}.md", report_title(start_date, end_date))
}

/// Write `content` as UTF-8 to `{dir}/{report_file_name}`, creating `dir`
/// if needed and replacing any earlier report for the same range.
///
/// # Errors
/// Returns [`ReportError::Io`] if the directory or file cannot be written.
pub fn save_local_report(
    dir: &Path,
    content: &str,
    start_date: &str,
    end_date: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(report_file_name(start_date, end_date));
    debug!("writing {} bytes to {}", content.len(), path.display());
    std::fs::write(&path, content).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
