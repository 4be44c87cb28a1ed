//! The closed set of per-item operations.
//!
//! Menu entries are a fixed enumeration dispatched through an exhaustive
//! match (see `FileBrowser::handle_operation`), not a string-keyed handler
//! lookup, so adding a variant forces every dispatch site to decide what to
//! do with it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOperation {
    Rename,
    Delete,
    Download,
    Move,
    Share,
    Info,
    Recover,
    Preview,
    ViewFolder,
}

/// Operations offered on items in a live bucket listing.
pub const BUCKET_OPERATIONS: &[FileOperation] = &[
    FileOperation::Rename,
    FileOperation::Move,
    FileOperation::Preview,
    FileOperation::Download,
    FileOperation::Share,
    FileOperation::Info,
    FileOperation::Delete,
    FileOperation::ViewFolder,
];

/// Operations offered on items sitting in the trash.
pub const TRASH_OPERATIONS: &[FileOperation] = &[FileOperation::Recover, FileOperation::Delete];
