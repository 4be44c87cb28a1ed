use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ItemKey, LookupUser, PageQuery, PageResponse, UploadFile};

/// Failures reported by the storage service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),

    #[error("request rejected by storage service: {0}")]
    Rejected(String),

    #[error("account is restricted: {0}")]
    Restricted(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The storage service as seen by the browsing engine.
///
/// All methods are suspension points: the engine dispatches them without
/// blocking and reconciles the result when the call settles. Completion
/// order is not guaranteed to match dispatch order and the engine never
/// cancels an in-flight call, so implementations must tolerate overlapping
/// requests.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Fetch one page of the listing. `cursor = None` means the first page.
    async fn fetch_page(&self, query: PageQuery) -> ApiResult<PageResponse>;

    /// Move items to a destination folder path.
    async fn move_items(&self, items: Vec<ItemKey>, destination_path: String) -> ApiResult<()>;

    /// Rename a single item to a new full name (stem + extension).
    async fn rename_item(&self, item: ItemKey, new_name: String) -> ApiResult<()>;

    /// Free-text user lookup (username, wallet address or ENS).
    async fn lookup_user(&self, query: String) -> ApiResult<Vec<LookupUser>>;

    /// Replace a shared folder's collaborator lists in one update.
    async fn update_shared_folder(
        &self,
        folder_id: String,
        readers: Vec<LookupUser>,
        writers: Vec<LookupUser>,
    ) -> ApiResult<()>;

    /// Upload externally dropped files into a destination folder path.
    async fn upload_files(&self, files: Vec<UploadFile>, destination_path: String)
        -> ApiResult<()>;
}
