//! Shared test fixtures: a recording mock of the storage service and
//! helpers for building listing items.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use storage_api::{
    ApiResult, Cid, FileSystemItem, ItemKey, LookupUser, PageCursor, PageQuery, PageResponse,
    StorageApi, UploadFile,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCall {
    FetchPage(PageQuery),
    MoveItems {
        items: Vec<ItemKey>,
        destination_path: String,
    },
    RenameItem {
        item: ItemKey,
        new_name: String,
    },
    LookupUser(String),
    UpdateSharedFolder {
        folder_id: String,
        readers: Vec<LookupUser>,
        writers: Vec<LookupUser>,
    },
    UploadFiles {
        files: Vec<UploadFile>,
        destination_path: String,
    },
}

pub struct MockStorage {
    calls: Mutex<Vec<RecordedCall>>,
    page: Mutex<PageResponse>,
    lookup_results: Mutex<Vec<LookupUser>>,
    response_delay: Mutex<Option<Duration>>,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            page: Mutex::new(empty_page()),
            lookup_results: Mutex::new(Vec::new()),
            response_delay: Mutex::new(None),
        })
    }

    pub fn set_page(&self, page: PageResponse) {
        *self.page.lock() = page;
    }

    pub fn set_lookup_results(&self, users: Vec<LookupUser>) {
        *self.lookup_results.lock() = users;
    }

    /// Delay every response, to hold requests "in flight" during a test.
    pub fn set_response_delay(&self, delay: Duration) {
        *self.response_delay.lock() = Some(delay);
    }

    pub fn clear_response_delay(&self) {
        *self.response_delay.lock() = None;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn count_calls(&self, matches: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().push(call);
    }

    async fn apply_delay(&self) {
        let delay = *self.response_delay.lock();
        if let Some(delay) = delay {
            smol::Timer::after(delay).await;
        }
    }
}

#[async_trait]
impl StorageApi for MockStorage {
    async fn fetch_page(&self, query: PageQuery) -> ApiResult<PageResponse> {
        self.record(RecordedCall::FetchPage(query));
        // snapshot at call time, so a held response carries the listing as
        // it was when the request went out
        let page = self.page.lock().clone();
        self.apply_delay().await;
        Ok(page)
    }

    async fn move_items(&self, items: Vec<ItemKey>, destination_path: String) -> ApiResult<()> {
        self.record(RecordedCall::MoveItems {
            items,
            destination_path,
        });
        self.apply_delay().await;
        Ok(())
    }

    async fn rename_item(&self, item: ItemKey, new_name: String) -> ApiResult<()> {
        self.record(RecordedCall::RenameItem { item, new_name });
        self.apply_delay().await;
        Ok(())
    }

    async fn lookup_user(&self, query: String) -> ApiResult<Vec<LookupUser>> {
        self.record(RecordedCall::LookupUser(query));
        self.apply_delay().await;
        Ok(self.lookup_results.lock().clone())
    }

    async fn update_shared_folder(
        &self,
        folder_id: String,
        readers: Vec<LookupUser>,
        writers: Vec<LookupUser>,
    ) -> ApiResult<()> {
        self.record(RecordedCall::UpdateSharedFolder {
            folder_id,
            readers,
            writers,
        });
        self.apply_delay().await;
        Ok(())
    }

    async fn upload_files(
        &self,
        files: Vec<UploadFile>,
        destination_path: String,
    ) -> ApiResult<()> {
        self.record(RecordedCall::UploadFiles {
            files,
            destination_path,
        });
        self.apply_delay().await;
        Ok(())
    }
}

// base58, 46 chars once the suffix is appended
const CID_STEM: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPb";
const CID_SUFFIXES: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K'];

pub fn cid(index: usize) -> Cid {
    let suffix = CID_SUFFIXES[index % CID_SUFFIXES.len()];
    Cid::parse(&format!("{}d{}", CID_STEM, suffix)).expect("fixture cid must be valid")
}

pub fn file_at(index: usize, name: &str, created_secs: i64) -> FileSystemItem {
    FileSystemItem {
        cid: cid(index),
        name: name.to_string(),
        is_folder: false,
        size: Some(100 + index as u64),
        created: Some(Utc.timestamp_opt(created_secs, 0).unwrap()),
    }
}

pub fn folder_at(index: usize, name: &str, created_secs: i64) -> FileSystemItem {
    FileSystemItem {
        is_folder: true,
        size: None,
        ..file_at(index, name, created_secs)
    }
}

pub fn single_page(items: Vec<FileSystemItem>) -> PageResponse {
    PageResponse {
        items,
        has_next: false,
        has_previous: false,
        next_cursor: None,
        previous_cursor: None,
    }
}

pub fn page_with_next(items: Vec<FileSystemItem>) -> PageResponse {
    PageResponse {
        items,
        has_next: true,
        has_previous: false,
        next_cursor: Some(PageCursor("cursor-next".to_string())),
        previous_cursor: None,
    }
}

pub fn empty_page() -> PageResponse {
    single_page(Vec::new())
}

pub fn user(name: &str) -> LookupUser {
    LookupUser {
        uuid: Uuid::new_v4(),
        username: Some(name.to_string()),
        public_address: None,
    }
}

/// Poll until `condition` holds or two seconds elapse.
pub fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}
