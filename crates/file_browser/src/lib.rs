//! File Browsing Engine
//!
//! Client-side orchestration for the storage product's listing views: which
//! items are selected, what page is showing, what a drag may drop onto, what
//! a rename actually sends, and who may read or write a shared folder. The
//! engine decides what to send and when; the network itself lives behind the
//! `storage_api` contracts.
//!
//! Everything here runs on the consumer's event loop. Network calls are the
//! only suspension points: they are dispatched detached and reconciled when
//! they settle, with generation counters guarding against completions that
//! outlived their context.

pub mod browser;
pub mod debounce;
pub mod drag_drop;
pub mod events;
pub mod operations;
pub mod pager;
pub mod paths;
pub mod rename;
pub mod selection;
pub mod sharing;
pub mod sort_filter;

pub use browser::{ClickModifiers, FileBrowser};
pub use debounce::{Debouncer, DEBOUNCE_DELAY};
pub use drag_drop::{DragMoveCoordinator, DragState, HoverState, MoveRequest, UploadRequest};
pub use events::BrowserEvent;
pub use operations::{FileOperation, BUCKET_OPERATIONS, TRASH_OPERATIONS};
pub use pager::{FetchDirection, ListingPager};
pub use rename::{RenameController, RenameOutcome, ValidationError};
pub use selection::SelectionModel;
pub use sharing::{PermissionSets, ShareDialog};
pub use sort_filter::{sort_page, SortState};
