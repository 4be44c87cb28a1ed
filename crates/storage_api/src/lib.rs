//! Storage API Contracts
//!
//! Wire-level data types and the client trait for the decentralized storage
//! service. The browsing engine only shapes calls into these contracts; the
//! transport, authentication and billing layers live behind the trait.

pub mod client;
pub mod types;

pub use client::{ApiError, ApiResult, StorageApi};
pub use types::{
    Cid, FileSystemItem, ItemKey, LookupUser, PageCursor, PageQuery, PageResponse,
    SearchParams, SharePermission, SharedFolder, SortColumn, SortDirection, UploadFile,
};
