//! Note types as exchanged with the HackMD API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Title used wherever the service gave a note none.
pub const UNTITLED: &str = "Untitled";

/// One entry of a note's folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPath {
    /// Folder display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl FolderPath {
    /// Create a folder path entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A note as listed by `GET /notes`: metadata only, no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    /// Note ID.
    pub id: String,
    /// Note title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Creation time, epoch milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: i64,
    /// Folders the note lives in, outermost first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder_paths: Vec<FolderPath>,
}

impl NoteSummary {
    /// Whether `folder` (exact match) is one of this note's folders.
    #[must_use]
    pub fn in_folder(&self, folder: &str) -> bool {
        self.folder_paths.iter().any(|f| f.name == folder)
    }
}

/// A note with its full, non-empty content.
///
/// Only the gateway builds these, and it refuses to build one whose
/// content is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    /// Note ID.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

impl NoteContent {
    /// Build a note, returning `None` when `content` is blank.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            title: title.into(),
            content,
            created_at,
        })
    }

    /// Title for display, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { UNTITLED } else { &self.title }
    }

    /// Creation date in UTC, or `None` if the timestamp is out of range.
    #[must_use]
    pub fn created_date(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(self.created_at).map(|dt| dt.date_naive())
    }
}

/// Access level for a newly created note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Only the owner.
    Owner,
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// Note title.
    pub title: String,
    /// Markdown body as uploaded.
    pub content: String,
    /// Who may read.
    pub read_permission: Permission,
    /// Who may write.
    pub write_permission: Permission,
}

impl NewNote {
    /// A private (owner read/write) note.
    ///
    /// Non-empty `tags` are written into a YAML front-matter block, which is
    /// how HackMD attaches tags to a note.
    #[must_use]
    pub fn private(title: impl Into<String>, content: &str, tags: &[String]) -> Self {
        let tags: Vec<&str> = tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        let content = if tags.is_empty() {
            content.to_string()
        } else {
            format!("---\ntags: {}\n---\n\n{content}", tags.join(", "))
        };
        Self {
            title: title.into(),
            content,
            read_permission: Permission::Owner,
            write_permission: Permission::Owner,
        }
    }
}

/// HackMD sends `null` for some absent fields; treat it like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
