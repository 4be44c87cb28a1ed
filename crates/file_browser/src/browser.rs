//! The listing view orchestrator.
//!
//! `FileBrowser` composes the pager, sort/search engine, selection, rename
//! and drag-move coordination for one folder listing, and owns the only
//! mutable handle to that state. User actions and resolved network callbacks
//! both mutate through the same mutex, so each mutation is a single atomic
//! step of the event loop. Mutations against the storage service are
//! fire-and-exit: the UI state advances as soon as the call is dispatched
//! and failures come back as notification events.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use smol::channel::{Receiver, Sender};
use storage_api::{
    FileSystemItem, ItemKey, PageQuery, SearchParams, SortColumn, StorageApi, UploadFile,
};

use crate::debounce::Debouncer;
use crate::drag_drop::DragMoveCoordinator;
use crate::events::BrowserEvent;
use crate::operations::FileOperation;
use crate::pager::{FetchDirection, ListingPager};
use crate::paths;
use crate::rename::{RenameController, RenameOutcome, ValidationError};
use crate::selection::SelectionModel;
use crate::sort_filter::{sort_page, SortState};

/// Keyboard modifiers attached to an item click.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

#[derive(Debug)]
struct BrowserState {
    current_path: String,
    items: Vec<FileSystemItem>,
    selection: SelectionModel,
    rename: RenameController,
    drag: DragMoveCoordinator,
    pager: ListingPager,
    sort: SortState,
    search_input: String,
    search: Option<SearchParams>,
    /// Bumped whenever the listing context changes (navigation, search or
    /// sort reset). Fetch completions carrying an older generation are
    /// stale and silently dropped.
    generation: u64,
}

impl BrowserState {
    fn new() -> Self {
        Self {
            current_path: paths::ROOT_PATH.to_string(),
            items: Vec::new(),
            selection: SelectionModel::new(),
            rename: RenameController::new(),
            drag: DragMoveCoordinator::new(),
            pager: ListingPager::new(),
            sort: SortState::default(),
            search_input: String::new(),
            search: None,
            generation: 0,
        }
    }

    fn page_query(&self, cursor: Option<storage_api::PageCursor>) -> PageQuery {
        PageQuery {
            cursor,
            sort_column: self.sort.column,
            sort_direction: self.sort.direction,
            search: self.search.clone(),
        }
    }

    /// The page in render order: the loaded page sorted client-side.
    fn visible_items(&self) -> Vec<FileSystemItem> {
        let mut items = self.items.clone();
        sort_page(&mut items, self.sort);
        items
    }
}

pub struct FileBrowser {
    state: Arc<Mutex<BrowserState>>,
    client: Arc<dyn StorageApi>,
    events: Sender<BrowserEvent>,
    search_debounce: Debouncer,
}

impl FileBrowser {
    /// Build a browser for the root path. Call [`Self::reload`] to fetch the
    /// first page.
    pub fn new(client: Arc<dyn StorageApi>) -> (Self, Receiver<BrowserEvent>) {
        let (events, receiver) = smol::channel::unbounded();
        let browser = Self {
            state: Arc::new(Mutex::new(BrowserState::new())),
            client,
            events,
            search_debounce: Debouncer::default(),
        };
        (browser, receiver)
    }

    /// An event sender for collaborators that share this browser's channel
    /// (e.g. the sharing dialog).
    pub fn event_sender(&self) -> Sender<BrowserEvent> {
        self.events.clone()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn current_path(&self) -> String {
        self.state.lock().current_path.clone()
    }

    /// The loaded page in render order (sorted client-side; ordering never
    /// crosses page boundaries).
    pub fn visible_items(&self) -> Vec<FileSystemItem> {
        self.state.lock().visible_items()
    }

    pub fn selected_items(&self) -> Vec<ItemKey> {
        self.state.lock().selection.items().to_vec()
    }

    pub fn editing_item(&self) -> Option<ItemKey> {
        self.state.lock().rename.editing().cloned()
    }

    pub fn sort_state(&self) -> SortState {
        self.state.lock().sort
    }

    pub fn page_number(&self) -> usize {
        self.state.lock().pager.page_number()
    }

    pub fn has_next_page(&self) -> bool {
        self.state.lock().pager.has_next()
    }

    pub fn has_previous_page(&self) -> bool {
        self.state.lock().pager.has_previous()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().pager.is_loading()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Route an item click. Plain click replaces the selection, ctrl/cmd
    /// toggles membership, shift extends the range from the anchor over the
    /// currently rendered order.
    pub fn handle_item_click(&self, item: &FileSystemItem, modifiers: ClickModifiers) {
        {
            let mut state = self.state.lock();
            let key = item.key();
            if modifiers.ctrl {
                state.selection.toggle(key);
            } else if modifiers.shift {
                let ordered = state.visible_items();
                state.selection.extend_range(key, &ordered);
            } else {
                state.selection.select(key);
            }
        }
        self.emit_selection_changed();
    }

    pub fn reset_selection(&self) {
        self.state.lock().selection.clear();
        self.emit_selection_changed();
    }

    // ------------------------------------------------------------------
    // Rename
    // ------------------------------------------------------------------

    pub fn begin_rename(&self, item: &FileSystemItem) {
        self.state.lock().rename.begin_edit(item.key());
    }

    pub fn cancel_rename(&self) {
        self.state.lock().rename.cancel();
    }

    /// Submit the edited stem. Validation failures keep the editor open;
    /// otherwise edit mode closes immediately and, when the name actually
    /// changed, a rename is dispatched fire-and-exit.
    pub fn submit_rename(
        &self,
        item: &FileSystemItem,
        edited_stem: &str,
    ) -> Result<(), ValidationError> {
        let outcome = self.state.lock().rename.submit(item, edited_stem)?;
        match outcome {
            RenameOutcome::Unchanged => {
                tracing::debug!("[LISTING] rename of '{}' unchanged, no call", item.name);
            }
            RenameOutcome::Renamed(new_name) => {
                let client = self.client.clone();
                let key = item.key();
                tracing::info!("[LISTING] renaming '{}' -> '{}'", item.name, new_name);
                self.dispatch_mutation("Rename", async move {
                    client
                        .rename_item(key, new_name)
                        .await
                        .context("rename request")?;
                    Ok(())
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Drag & drop
    // ------------------------------------------------------------------

    /// Start dragging `item`. Refused while a rename is in progress.
    pub fn begin_drag(&self, item: &FileSystemItem) -> bool {
        let mut state = self.state.lock();
        let BrowserState {
            selection,
            rename,
            drag,
            ..
        } = &mut *state;
        drag.begin_drag(item, selection, rename.is_editing())
    }

    /// Report the pointer over a potential drop target; returns validity
    /// (for hover highlighting).
    pub fn hover_drop_target(&self, target: &FileSystemItem) -> bool {
        let mut state = self.state.lock();
        let current_path = state.current_path.clone();
        state.drag.hover(target, &current_path)
    }

    pub fn leave_drop_target(&self) {
        self.state.lock().drag.leave();
    }

    pub fn cancel_drag(&self) {
        self.state.lock().drag.cancel();
    }

    /// Drop the payload on `target`. On a valid target the move is
    /// dispatched and the selection cleared immediately — an optimistic
    /// reset, not gated on the move's success. Returns whether a move was
    /// dispatched.
    pub fn drop_on_folder(&self, target: &FileSystemItem) -> bool {
        let request = {
            let mut state = self.state.lock();
            let current_path = state.current_path.clone();
            let Some(request) = state.drag.drop_on(target, &current_path) else {
                return false;
            };
            state.selection.clear();
            request
        };
        self.emit_selection_changed();

        tracing::info!(
            "[LISTING] moving {} item(s) to {}",
            request.items.len(),
            request.destination_path
        );
        let client = self.client.clone();
        self.dispatch_mutation("Move", async move {
            client
                .move_items(request.items, request.destination_path)
                .await
                .context("move request")?;
            Ok(())
        });
        true
    }

    /// Native files dropped from outside the listing; only folders accept
    /// them. Returns whether an upload was dispatched.
    pub fn drop_external_files(&self, target: &FileSystemItem, files: Vec<UploadFile>) -> bool {
        let current_path = self.state.lock().current_path.clone();
        let Some(request) = crate::drag_drop::accept_external_drop(target, &current_path, files)
        else {
            return false;
        };

        tracing::info!(
            "[LISTING] uploading {} file(s) to {}",
            request.files.len(),
            request.destination_path
        );
        let client = self.client.clone();
        self.dispatch_mutation("Upload", async move {
            client
                .upload_files(request.files, request.destination_path)
                .await
                .context("upload request")?;
            Ok(())
        });
        true
    }

    // ------------------------------------------------------------------
    // Sorting & search
    // ------------------------------------------------------------------

    /// Header click. Any sort change resets pagination to the first page;
    /// stale cursors are never reused across a parameter change.
    pub fn toggle_sort(&self, column: SortColumn) {
        self.state.lock().sort.toggle(column);
        dispatch_first_page(&self.state, &self.client, &self.events);
    }

    /// Search box input. Classification and dispatch are debounced (400 ms
    /// trailing): a burst of keystrokes yields one network query, for the
    /// last value typed.
    pub fn set_search_input(&self, input: &str) {
        self.state.lock().search_input = input.to_string();

        let text = input.to_string();
        let state = self.state.clone();
        let client = self.client.clone();
        let events = self.events.clone();
        self.search_debounce.schedule(move || {
            state.lock().search = SearchParams::classify(&text);
            dispatch_first_page(&state, &client, &events);
        });
    }

    pub fn search_input(&self) -> String {
        self.state.lock().search_input.clone()
    }

    // ------------------------------------------------------------------
    // Pagination & navigation
    // ------------------------------------------------------------------

    /// (Re)fetch the first page for the current path, sort and search.
    pub fn reload(&self) {
        dispatch_first_page(&self.state, &self.client, &self.events);
    }

    pub fn request_next(&self) {
        self.request_page(FetchDirection::Next);
    }

    pub fn request_previous(&self) {
        self.request_page(FetchDirection::Previous);
    }

    /// Move the listing to a different folder. Selection, rename state,
    /// drag state, sort and search all belong to the old collection context
    /// and reset with it.
    pub fn navigate_to(&self, path: &str) {
        {
            let mut state = self.state.lock();
            state.current_path = path.to_string();
            state.items.clear();
            state.selection.clear();
            state.rename.cancel();
            state.drag.cancel();
            state.sort = SortState::default();
            state.search_input.clear();
            state.search = None;
        }
        self.search_debounce.cancel_pending();
        let _ = self.events.try_send(BrowserEvent::NavigatedTo {
            path: path.to_string(),
        });
        dispatch_first_page(&self.state, &self.client, &self.events);
    }

    /// Enter a folder shown in the listing.
    pub fn view_folder(&self, item: &FileSystemItem) {
        if !item.is_folder {
            return;
        }
        let target = {
            let state = self.state.lock();
            paths::path_with_entry(&state.current_path, &item.name)
        };
        self.navigate_to(&target);
    }

    // ------------------------------------------------------------------
    // Menu operations
    // ------------------------------------------------------------------

    /// Dispatch a menu operation. The match is exhaustive on purpose:
    /// operations the engine owns are handled here, the rest are forwarded
    /// to the surrounding UI as events.
    pub fn handle_operation(&self, operation: FileOperation, item: &FileSystemItem) {
        match operation {
            FileOperation::Rename => self.begin_rename(item),
            FileOperation::ViewFolder => self.view_folder(item),
            FileOperation::Delete
            | FileOperation::Download
            | FileOperation::Move
            | FileOperation::Share
            | FileOperation::Info
            | FileOperation::Recover
            | FileOperation::Preview => {
                let _ = self.events.try_send(BrowserEvent::OperationRequested {
                    operation,
                    item: item.key(),
                });
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn emit_selection_changed(&self) {
        let selected = self.selected_items();
        let _ = self
            .events
            .try_send(BrowserEvent::SelectionChanged { selected });
    }

    /// Fire-and-exit dispatch of a mutation: the future runs detached and
    /// a failure surfaces only as a notification event.
    fn dispatch_mutation<F>(&self, label: &'static str, fut: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let events = self.events.clone();
        smol::spawn(async move {
            if let Err(error) = fut.await {
                tracing::error!("[LISTING] {} failed: {:#}", label, error);
                let _ = events.try_send(BrowserEvent::Notification {
                    message: format!("{} failed: {:#}", label, error),
                });
            }
        })
        .detach();
    }

    fn request_page(&self, direction: FetchDirection) {
        let (generation, query) = {
            let mut state = self.state.lock();
            let cursor = match direction {
                FetchDirection::Next => state.pager.request_next(),
                FetchDirection::Previous => state.pager.request_previous(),
            };
            let Some(cursor) = cursor else {
                return;
            };
            (state.generation, state.page_query(Some(cursor)))
        };

        let state = self.state.clone();
        let client = self.client.clone();
        let events = self.events.clone();
        smol::spawn(async move {
            let result = client.fetch_page(query).await;
            let mut state = state.lock();
            if state.generation != generation {
                tracing::trace!("[LISTING] dropping stale page response");
                return;
            }
            match result {
                Ok(response) => {
                    state.pager.complete(direction, &response);
                    state.items = response.items;
                    let listed = state.items.clone();
                    state.selection.retain_listed(&listed);
                    let _ = events.try_send(BrowserEvent::PageLoaded {
                        page_number: state.pager.page_number(),
                    });
                }
                Err(error) => {
                    state.pager.fail(direction);
                    tracing::error!("[LISTING] page fetch failed: {}", error);
                    let _ = events.try_send(BrowserEvent::Notification {
                        message: format!("Failed to load page: {}", error),
                    });
                }
            }
        })
        .detach();
    }
}

/// Reset pagination and fetch the first page under a fresh generation;
/// completions from the previous context are dropped when they land.
fn dispatch_first_page(
    state: &Arc<Mutex<BrowserState>>,
    client: &Arc<dyn StorageApi>,
    events: &Sender<BrowserEvent>,
) {
    let (generation, query) = {
        let mut state = state.lock();
        state.generation += 1;
        state.pager.reset();
        (state.generation, state.page_query(None))
    };

    let state = state.clone();
    let client = client.clone();
    let events = events.clone();
    smol::spawn(async move {
        let result = client.fetch_page(query).await;
        let mut state = state.lock();
        if state.generation != generation {
            tracing::trace!("[LISTING] dropping stale first-page response");
            return;
        }
        match result {
            Ok(response) => {
                state.pager.seed(&response);
                state.items = response.items;
                let listed = state.items.clone();
                state.selection.retain_listed(&listed);
                let _ = events.try_send(BrowserEvent::PageLoaded {
                    page_number: state.pager.page_number(),
                });
            }
            Err(error) => {
                tracing::error!("[LISTING] listing fetch failed: {}", error);
                let _ = events.try_send(BrowserEvent::Notification {
                    message: format!("Failed to load listing: {}", error),
                });
            }
        }
    })
    .detach();
}
