//! Property-Based Tests for note selection and prompt assembly.
//!
//! Uses `proptest` to check the filter invariants over arbitrary listings:
//! output is chronological, every selected note passes both predicates,
//! nothing that passes is dropped, and an empty selection is always an error.

use proptest::prelude::*;

use weeknote_core::filter::{FilterCriteria, filter_by_folder_and_date};
use weeknote_core::prompt::build_prompt;
use weeknote_core::types::{FolderPath, NoteContent, NoteSummary};
use weeknote_core::NotesError;

const FOLDERS: &[&str] = &["Weekly", "Archive", "Drafts", "weekly"];

// 2023-12-01 .. 2024-03-01, epoch millis.
const RANGE_START: i64 = 1_701_388_800_000;
const RANGE_END: i64 = 1_709_251_200_000;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_note() -> impl Strategy<Value = NoteSummary> {
    (
        "[a-z0-9]{4,8}",
        RANGE_START..RANGE_END,
        prop::collection::vec(prop::sample::select(FOLDERS), 0..3),
    )
        .prop_map(|(id, created_at, folders)| NoteSummary {
            title: format!("Note {id}"),
            id,
            created_at,
            folder_paths: folders.into_iter().map(FolderPath::new).collect(),
        })
}

fn arb_date() -> impl Strategy<Value = String> {
    (0u32..90).prop_map(|offset| {
        let base = chrono::NaiveDate::from_ymd_opt(2023, 12, 1).expect("valid base date");
        (base + chrono::Days::new(u64::from(offset)))
            .format("%Y-%m-%d")
            .to_string()
    })
}

// ---------------------------------------------------------------------------
// Property: selection is sorted and every element satisfies the predicates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn selection_is_sorted_and_matching(
        notes in prop::collection::vec(arb_note(), 0..40),
        folder in prop::sample::select(FOLDERS),
        start in arb_date(),
        end in arb_date(),
    ) {
        let criteria = FilterCriteria::new(folder, start, end).expect("generated dates are valid");
        match filter_by_folder_and_date(&notes, &criteria) {
            Ok(selected) => {
                prop_assert!(!selected.is_empty());
                for pair in selected.windows(2) {
                    prop_assert!(pair[0].created_at <= pair[1].created_at);
                }
                for note in &selected {
                    prop_assert!(note.folder_paths.iter().any(|f| f.name == folder));
                    prop_assert!(criteria.start_millis() <= note.created_at);
                    prop_assert!(note.created_at <= criteria.end_millis());
                }
                let expected = notes.iter().filter(|n| criteria.matches(n)).count();
                prop_assert_eq!(selected.len(), expected);
            }
            Err(NotesError::NoMatch { .. }) => {
                prop_assert!(notes.iter().all(|n| !criteria.matches(n)));
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_listing_is_always_no_match(
        folder in prop::sample::select(FOLDERS),
        start in arb_date(),
        end in arb_date(),
    ) {
        let criteria = FilterCriteria::new(folder, start, end).expect("generated dates are valid");
        let is_no_match = matches!(
            filter_by_folder_and_date(&[], &criteria),
            Err(NotesError::NoMatch { .. })
        );
        prop_assert!(is_no_match);
    }

    #[test]
    fn prompt_is_deterministic(contents in prop::collection::vec("[a-zA-Z ]{1,40}[a-z]", 0..8)) {
        let notes: Vec<NoteContent> = contents
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let offset = i64::try_from(i).expect("small index") * 86_400_000;
                NoteContent::new(format!("n{i}"), format!("Week {i}"), c.clone(), RANGE_START + offset)
            })
            .collect();
        let first = build_prompt(&notes);
        let second = build_prompt(&notes);
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
        for note in &notes {
            prop_assert!(first.contains(&note.content));
        }
    }
}
