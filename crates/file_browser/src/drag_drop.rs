//! Drag-initiated move workflow.
//!
//! The payload is computed once at drag start and never changes for the
//! drag's lifetime: the current selection when the dragged item is part of
//! it, otherwise a singleton of the dragged item. Dragging is disabled
//! entirely while an item is in rename mode.

use storage_api::{FileSystemItem, ItemKey, UploadFile};

use crate::paths;
use crate::selection::SelectionModel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverState {
    None,
    Invalid,
    Valid { target: ItemKey },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: Vec<ItemKey>,
        hover: HoverState,
    },
}

/// A move the coordinator decided to trigger. The caller dispatches it and
/// clears the selection immediately, not gated on the call's success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub items: Vec<ItemKey>,
    pub destination_path: String,
}

/// An upload triggered by dropping native files onto a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub files: Vec<UploadFile>,
    pub destination_path: String,
}

#[derive(Clone, Debug, Default)]
pub struct DragMoveCoordinator {
    state: DragState,
}

impl DragMoveCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn payload(&self) -> Option<&[ItemKey]> {
        match &self.state {
            DragState::Dragging { payload, .. } => Some(payload),
            DragState::Idle => None,
        }
    }

    /// Start a drag on `item`. Returns false (and stays idle) while a rename
    /// is in progress.
    pub fn begin_drag(
        &mut self,
        item: &FileSystemItem,
        selection: &SelectionModel,
        editing: bool,
    ) -> bool {
        if editing {
            tracing::debug!("[LISTING] drag suppressed while renaming");
            return false;
        }
        let key = item.key();
        let payload = if selection.contains(&key) {
            selection.items().to_vec()
        } else {
            vec![key]
        };
        self.state = DragState::Dragging {
            payload,
            hover: HoverState::None,
        };
        true
    }

    /// Track the pointer over a potential drop target; returns validity.
    pub fn hover(&mut self, target: &FileSystemItem, current_path: &str) -> bool {
        let valid = match &self.state {
            DragState::Dragging { payload, .. } => {
                Self::is_valid_target(payload, target, current_path)
            }
            DragState::Idle => false,
        };
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = if valid {
                HoverState::Valid { target: target.key() }
            } else {
                HoverState::Invalid
            };
        }
        valid
    }

    /// Pointer left the current hover target.
    pub fn leave(&mut self) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = HoverState::None;
        }
    }

    /// Drop on `target`. Yields the move to dispatch when the target is
    /// valid; either way the coordinator returns to idle.
    pub fn drop_on(
        &mut self,
        target: &FileSystemItem,
        current_path: &str,
    ) -> Option<MoveRequest> {
        let request = match &self.state {
            DragState::Dragging { payload, .. }
                if Self::is_valid_target(payload, target, current_path) =>
            {
                Some(MoveRequest {
                    items: payload.clone(),
                    destination_path: paths::path_with_entry(current_path, &target.name),
                })
            }
            _ => None,
        };
        self.state = DragState::Idle;
        request
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// A drop target is valid iff it is a folder, it is not itself part of
    /// the payload, and it does not sit inside a dragged entry (segment-wise
    /// ancestor check, so a folder cannot land in its own descendant).
    fn is_valid_target(
        payload: &[ItemKey],
        target: &FileSystemItem,
        current_path: &str,
    ) -> bool {
        if !target.is_folder {
            return false;
        }
        let target_key = target.key();
        if payload.contains(&target_key) {
            return false;
        }
        let source_paths: Vec<String> = payload
            .iter()
            .map(|key| paths::path_with_entry(current_path, &key.name))
            .collect();
        let destination = paths::path_with_entry(current_path, &target.name);
        paths::is_valid_move_destination(&source_paths, &destination)
    }
}

/// Acceptor for files dragged in from outside the listing. Only folders
/// accept them; the upload goes to the folder's own path.
pub fn accept_external_drop(
    target: &FileSystemItem,
    current_path: &str,
    files: Vec<UploadFile>,
) -> Option<UploadRequest> {
    if !target.is_folder || files.is_empty() {
        return None;
    }
    Some(UploadRequest {
        destination_path: paths::path_with_entry(current_path, &target.name),
        files,
    })
}
