//! Events emitted to the surrounding UI.
//!
//! The engine never renders anything; it reports state changes over an
//! unbounded channel and the view layer decides what to do with them.
//! Operation failures arrive here as notifications because the optimistic
//! transition (cleared selection, closed dialog) has already happened.

use storage_api::ItemKey;

use crate::operations::FileOperation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The selection changed; carries the full selected set.
    SelectionChanged { selected: Vec<ItemKey> },

    /// A page fetch settled and the listing contents were replaced.
    PageLoaded { page_number: usize },

    /// The listing moved to a different folder path.
    NavigatedTo { path: String },

    /// An operation the surrounding UI owns (download, delete, preview…)
    /// was requested on an item.
    OperationRequested {
        operation: FileOperation,
        item: ItemKey,
    },

    /// An asynchronous mutation failed after its optimistic UI transition;
    /// shown out-of-band, never by restoring prior state.
    Notification { message: String },
}
