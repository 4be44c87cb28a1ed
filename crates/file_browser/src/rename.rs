//! In-place rename: name splitting, validation and the single-editor state.
//!
//! The user edits only the stem; for files the extension is carried over
//! verbatim, folders never get one. Submission is fire-and-exit: the rename
//! request is dispatched and edit mode closes immediately, failures are
//! reported asynchronously through the notification channel.

use storage_api::{FileSystemItem, ItemKey};
use thiserror::Error;

pub const MAX_NAME_LENGTH: usize = 255;

/// Synchronous, pre-submission failures. Surfaced inline next to the edit
/// field; submission is blocked and the editing state is kept.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name cannot exceed {MAX_NAME_LENGTH} characters")]
    TooLong,

    #[error("name cannot contain '/' or '\\'")]
    PathSeparator,

    #[error("name cannot contain control characters")]
    ControlCharacter,
}

/// Split a display name into `(stem, extension)`.
///
/// Folders are all stem. For files the extension is the substring after the
/// final `.` when that substring is non-empty; `README` and `name.` have no
/// extension.
pub fn split_name(name: &str, is_folder: bool) -> (String, String) {
    if is_folder {
        return (name.to_string(), String::new());
    }
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => {
            (name[..index].to_string(), name[index + 1..].to_string())
        }
        _ => (name.to_string(), String::new()),
    }
}

/// Shared name-validation policy, applied to the edited stem.
pub fn validate_stem(stem: &str) -> Result<(), ValidationError> {
    let trimmed = stem.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if trimmed.contains(['/', '\\']) {
        return Err(ValidationError::PathSeparator);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter);
    }
    Ok(())
}

/// The outcome of a valid submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Candidate equals the current name: exit edit mode, zero network calls.
    Unchanged,
    /// Dispatch a rename to this full name.
    Renamed(String),
}

/// Tracks which item, if any, is in rename mode. At most one item is
/// editable at a time.
#[derive(Clone, Debug, Default)]
pub struct RenameController {
    editing: Option<ItemKey>,
}

impl RenameController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter edit mode on `item`, implicitly cancelling any prior edit.
    pub fn begin_edit(&mut self, item: ItemKey) {
        self.editing = Some(item);
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&ItemKey> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Validate the edited stem and rebuild the candidate full name.
    ///
    /// On validation failure the editing state is kept. On success edit mode
    /// exits immediately, whether or not a rename needs dispatching.
    pub fn submit(
        &mut self,
        item: &FileSystemItem,
        edited_stem: &str,
    ) -> Result<RenameOutcome, ValidationError> {
        validate_stem(edited_stem)?;

        let (_, extension) = split_name(&item.name, item.is_folder);
        let stem = edited_stem.trim();
        let candidate = if extension.is_empty() {
            stem.to_string()
        } else {
            format!("{}.{}", stem, extension)
        };

        self.editing = None;
        if candidate == item.name {
            Ok(RenameOutcome::Unchanged)
        } else {
            Ok(RenameOutcome::Renamed(candidate))
        }
    }
}
