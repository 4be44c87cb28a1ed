use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CONTENT IDENTIFIERS
// ============================================================================

/// Characters allowed in a base58btc-encoded CIDv0 (no `0`, `O`, `I`, `l`).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A content-derived identifier for stored data.
///
/// Only the textual syntax is checked here; resolving a CID is the storage
/// service's job. Two path entries may carry the same CID under different
/// names (a file pinned twice), so item identity is always `(cid, name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    /// Parse a string as a CID, rejecting anything that doesn't match the
    /// v0 (`Qm…`, base58) or v1 (`b…`, lowercase base32) syntax.
    pub fn parse(value: &str) -> Option<Self> {
        if Self::is_valid_syntax(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// Whether `value` is CID-shaped. Used to classify search input: a
    /// CID-shaped query is dispatched as a CID search, never as a name filter.
    pub fn is_valid_syntax(value: &str) -> bool {
        is_cid_v0(value) || is_cid_v1(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_cid_v0(value: &str) -> bool {
    value.len() == 46
        && value.starts_with("Qm")
        && value.chars().all(|c| BASE58_ALPHABET.contains(c))
}

fn is_cid_v1(value: &str) -> bool {
    // base32-lower multibase prefix plus at least a sha2-256 payload
    value.len() >= 59
        && value.starts_with('b')
        && value
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '2'..='7'))
}

// ============================================================================
// LISTING ITEMS
// ============================================================================

/// A file or folder as reported by the listing endpoint.
///
/// Items are immutable snapshots; the engine never mutates one in place, it
/// only produces new desired states (a rename request, a move request).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileSystemItem {
    pub cid: Cid,
    pub name: String,
    pub is_folder: bool,
    /// Missing for folders and for pins the service has not sized yet.
    pub size: Option<u64>,
    pub created: Option<DateTime<Utc>>,
}

impl FileSystemItem {
    pub fn key(&self) -> ItemKey {
        ItemKey {
            cid: self.cid.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity of a listed item: the `(cid, name)` pair, not the CID alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub cid: Cid,
    pub name: String,
}

// ============================================================================
// PAGINATION & SEARCH
// ============================================================================

/// Opaque paging token returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    Size,
    Date,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A search query after classification. Exactly one variant is sent per
/// query; CID-shaped input is never also treated as a name filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchParams {
    SearchedCid(Cid),
    SearchedName(String),
}

impl SearchParams {
    /// Classify raw search input. Empty (after trimming) input means no
    /// search filter at all.
    pub fn classify(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        match Cid::parse(trimmed) {
            Some(cid) => Some(Self::SearchedCid(cid)),
            None => Some(Self::SearchedName(trimmed.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub cursor: Option<PageCursor>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub search: Option<SearchParams>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub items: Vec<FileSystemItem>,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_cursor: Option<PageCursor>,
    pub previous_cursor: Option<PageCursor>,
}

// ============================================================================
// SHARING
// ============================================================================

/// A user record returned by the lookup endpoint (username, wallet address
/// or ENS search all resolve to this).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupUser {
    pub uuid: Uuid,
    pub username: Option<String>,
    pub public_address: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    Read,
    Write,
}

/// A shared folder (bucket) with its current collaborator lists, as handed
/// to the sharing dialog when it opens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharedFolder {
    pub id: String,
    pub name: String,
    pub readers: Vec<LookupUser>,
    pub writers: Vec<LookupUser>,
}

// ============================================================================
// UPLOADS
// ============================================================================

/// A file dragged in from outside the listing (native drag payload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
}
