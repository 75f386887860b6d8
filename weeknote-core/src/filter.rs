//! Folder and date-range selection over a note listing.
//!
//! Both date bounds are `YYYY-MM-DD` strings taken as UTC midnight and are
//! inclusive: a note matches when `start <= createdAt <= end` in epoch
//! milliseconds. Note that this makes the end bound midnight *at the start*
//! of the end date.

use chrono::NaiveDate;

use crate::error::{NotesError, Result};
use crate::types::NoteSummary;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parsed filter: folder name plus inclusive UTC-midnight bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Folder name, matched exactly.
    pub folder_name: String,
    /// Start date as given.
    pub start_date: String,
    /// End date as given.
    pub end_date: String,
    start_ms: i64,
    end_ms: i64,
}

impl FilterCriteria {
    /// Parse both dates up front.
    ///
    /// # Errors
    /// Returns [`NotesError::InvalidDate`] for the first bound that is not
    /// a valid `YYYY-MM-DD` date.
    pub fn new(
        folder_name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        let start_ms = date_to_millis(&start_date)?;
        let end_ms = date_to_millis(&end_date)?;
        Ok(Self {
            folder_name: folder_name.into(),
            start_date,
            end_date,
            start_ms,
            end_ms,
        })
    }

    /// Inclusive lower bound, epoch milliseconds.
    #[must_use]
    pub fn start_millis(&self) -> i64 {
        self.start_ms
    }

    /// Inclusive upper bound, epoch milliseconds.
    #[must_use]
    pub fn end_millis(&self) -> i64 {
        self.end_ms
    }

    /// Whether a single note passes both the folder and date checks.
    #[must_use]
    pub fn matches(&self, note: &NoteSummary) -> bool {
        note.in_folder(&self.folder_name)
            && self.start_ms <= note.created_at
            && note.created_at <= self.end_ms
    }
}

/// Convert a `YYYY-MM-DD` string to epoch milliseconds at UTC midnight.
///
/// # Errors
/// Returns [`NotesError::InvalidDate`] if the string is not a valid date.
pub fn date_to_millis(date: &str) -> Result<i64> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| NotesError::InvalidDate {
        input: date.to_string(),
    })?;
    // Reject forms chrono tolerates but the format does not mean, e.g. "2024-1-5".
    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(NotesError::InvalidDate {
            input: date.to_string(),
        });
    }
    Ok(parsed.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis())
}

/// Keep the notes in `criteria.folder_name` created within the date range,
/// sorted ascending by creation time.
///
/// The sort is stable, so notes sharing a timestamp keep listing order.
///
/// # Errors
/// Returns [`NotesError::NoMatch`] when nothing matches; an empty selection
/// is never returned.
pub fn filter_by_folder_and_date(
    notes: &[NoteSummary],
    criteria: &FilterCriteria,
) -> Result<Vec<NoteSummary>> {
    let mut selected: Vec<NoteSummary> = notes
        .iter()
        .filter(|note| criteria.matches(note))
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(NotesError::NoMatch {
            folder: criteria.folder_name.clone(),
            start: criteria.start_date.clone(),
            end: criteria.end_date.clone(),
        });
    }

    selected.sort_by_key(|note| note.created_at);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FolderPath;

    fn note(id: &str, created_at: i64, folders: &[&str]) -> NoteSummary {
        NoteSummary {
            id: id.into(),
            title: format!("Note {id}"),
            created_at,
            folder_paths: folders.iter().map(|f| FolderPath::new(*f)).collect(),
        }
    }

    const JAN_01: i64 = 1_704_067_200_000;
    const JAN_15: i64 = 1_705_276_800_000;
    const JAN_31: i64 = 1_706_659_200_000;

    #[test]
    fn date_parses_to_utc_midnight() {
        assert_eq!(date_to_millis("2024-01-01").expect("valid"), JAN_01);
        assert_eq!(date_to_millis("2024-01-31").expect("valid"), JAN_31);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for bad in ["2024/01/01", "2024-13-01", "2024-02-30", "yesterday", "", "2024-1-5"] {
            assert!(
                matches!(date_to_millis(bad), Err(NotesError::InvalidDate { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn criteria_rejects_bad_end_date() {
        let err = FilterCriteria::new("F", "2024-01-01", "Jan 31").expect_err("invalid");
        assert!(err.to_string().contains("Jan 31"));
    }

    #[test]
    fn single_note_in_range_is_selected() {
        let notes = vec![note("n1", JAN_15 + 3_600_000, &["Test Folder"])];
        let criteria = FilterCriteria::new("Test Folder", "2024-01-01", "2024-01-31").expect("valid");
        let selected = filter_by_folder_and_date(&notes, &criteria).expect("one match");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "n1");
    }

    #[test]
    fn bounds_are_inclusive() {
        let notes = vec![
            note("before", JAN_01 - 1, &["F"]),
            note("start", JAN_01, &["F"]),
            note("end", JAN_31, &["F"]),
            note("after", JAN_31 + 1, &["F"]),
        ];
        let criteria = FilterCriteria::new("F", "2024-01-01", "2024-01-31").expect("valid");
        let ids: Vec<_> = filter_by_folder_and_date(&notes, &criteria)
            .expect("matches")
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["start", "end"]);
    }

    #[test]
    fn other_folders_are_excluded_and_result_sorted() {
        let notes = vec![
            note("c", JAN_31, &["Archive", "F"]),
            note("x", JAN_15, &["Other"]),
            note("a", JAN_01, &["F"]),
            note("b", JAN_15, &["F"]),
        ];
        let criteria = FilterCriteria::new("F", "2024-01-01", "2024-01-31").expect("valid");
        let ids: Vec<_> = filter_by_folder_and_date(&notes, &criteria)
            .expect("matches")
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_selection_is_no_match() {
        let notes = vec![note("n", JAN_15, &["Other"])];
        let criteria = FilterCriteria::new("F", "2024-01-01", "2024-01-31").expect("valid");
        let err = filter_by_folder_and_date(&notes, &criteria).expect_err("no match");
        assert!(matches!(err, NotesError::NoMatch { .. }));
        assert_eq!(
            err.to_string(),
            "No notes found in folder 'F' between 2024-01-01 and 2024-01-31"
        );
    }

    #[test]
    fn reversed_range_is_no_match() {
        let notes = vec![note("n", JAN_15, &["F"])];
        let criteria = FilterCriteria::new("F", "2024-01-31", "2024-01-01").expect("valid");
        assert!(matches!(
            filter_by_folder_and_date(&notes, &criteria),
            Err(NotesError::NoMatch { .. })
        ));
    }
}
