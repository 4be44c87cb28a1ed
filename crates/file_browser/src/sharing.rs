//! Shared-folder permission dialog.
//!
//! `PermissionSets` keeps the reader/writer partition: a collaborator is in
//! at most one of the two sets at all times, and permission changes move a
//! user between sets in a single mutation. `ShareDialog` wraps the sets with
//! the debounced user lookup and the close/submit policy: nothing is sent
//! until the dialog closes, and only if something actually changed.

use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use smol::channel::{Receiver, Sender};
use storage_api::{LookupUser, SharePermission, SharedFolder, StorageApi};
use uuid::Uuid;

use crate::debounce::Debouncer;
use crate::events::BrowserEvent;

// ============================================================================
// PERMISSION SETS
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct PermissionSets {
    readers: Vec<LookupUser>,
    writers: Vec<LookupUser>,
}

impl PermissionSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both sets from the folder's collaborator lists. Duplicates
    /// across the incoming lists are dropped, readers winning, so the
    /// disjointness invariant holds from the start.
    pub fn seed(&mut self, readers: &[LookupUser], writers: &[LookupUser]) {
        self.readers.clear();
        self.writers.clear();
        for user in readers {
            self.add(user.clone(), SharePermission::Read);
        }
        for user in writers {
            self.add(user.clone(), SharePermission::Write);
        }
    }

    pub fn readers(&self) -> &[LookupUser] {
        &self.readers
    }

    pub fn writers(&self) -> &[LookupUser] {
        &self.writers
    }

    pub fn permission_of(&self, uuid: Uuid) -> Option<SharePermission> {
        if self.readers.iter().any(|u| u.uuid == uuid) {
            Some(SharePermission::Read)
        } else if self.writers.iter().any(|u| u.uuid == uuid) {
            Some(SharePermission::Write)
        } else {
            None
        }
    }

    /// Add a new collaborator at `permission`. Users already present in
    /// either set are not added again.
    pub fn add(&mut self, user: LookupUser, permission: SharePermission) -> bool {
        if self.permission_of(user.uuid).is_some() {
            return false;
        }
        self.set_for(permission).push(user);
        true
    }

    /// Move a collaborator to `to`. Removal and insertion happen in one
    /// mutation; observers never see the user in both sets or neither.
    pub fn move_permission(&mut self, uuid: Uuid, to: SharePermission) -> bool {
        match self.permission_of(uuid) {
            Some(current) if current != to => {
                let from = self.set_for(current);
                let Some(index) = from.iter().position(|u| u.uuid == uuid) else {
                    return false;
                };
                let user = from.remove(index);
                self.set_for(to).push(user);
                true
            }
            _ => false,
        }
    }

    /// Remove a collaborator from whichever set holds them.
    pub fn remove(&mut self, uuid: Uuid) -> bool {
        let before = self.readers.len() + self.writers.len();
        self.readers.retain(|u| u.uuid != uuid);
        self.writers.retain(|u| u.uuid != uuid);
        before != self.readers.len() + self.writers.len()
    }

    fn set_for(&mut self, permission: SharePermission) -> &mut Vec<LookupUser> {
        match permission {
            SharePermission::Read => &mut self.readers,
            SharePermission::Write => &mut self.writers,
        }
    }
}

// ============================================================================
// SHARE DIALOG
// ============================================================================

#[derive(Debug, Default)]
struct ShareState {
    folder_id: Option<String>,
    sets: PermissionSets,
    pending_permission: Option<SharePermission>,
    query: String,
    suggestions: Vec<LookupUser>,
    loading_lookup: bool,
    dirty: bool,
    links_touched: bool,
    /// Bumped on every open/close so completions belonging to a previous
    /// dialog instance are recognized and dropped.
    generation: u64,
    /// Bumped per lookup dispatch; an older lookup resolving after a newer
    /// one must not clobber the newer suggestions.
    lookup_seq: u64,
}

impl ShareState {
    fn reset(&mut self) {
        self.folder_id = None;
        self.sets = PermissionSets::new();
        self.pending_permission = None;
        self.query.clear();
        self.suggestions.clear();
        self.loading_lookup = false;
        self.dirty = false;
        self.links_touched = false;
        self.generation += 1;
    }
}

pub struct ShareDialog {
    state: Arc<Mutex<ShareState>>,
    client: Arc<dyn StorageApi>,
    events: Sender<BrowserEvent>,
    lookup_debounce: Debouncer,
}

impl ShareDialog {
    pub fn new(client: Arc<dyn StorageApi>) -> (Self, Receiver<BrowserEvent>) {
        let (events, receiver) = smol::channel::unbounded();
        (Self::with_events(client, events), receiver)
    }

    /// Build a dialog that shares an existing event channel (e.g. the one
    /// the listing view already hands to the UI).
    pub fn with_events(client: Arc<dyn StorageApi>, events: Sender<BrowserEvent>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ShareState::default())),
            client,
            events,
            lookup_debounce: Debouncer::default(),
        }
    }

    /// Open the dialog for `folder`, seeding the permission sets from its
    /// current collaborators. A previous instance's state never leaks in.
    pub fn open(&self, folder: &SharedFolder) {
        let mut state = self.state.lock();
        state.reset();
        state.folder_id = Some(folder.id.clone());
        state.sets.seed(&folder.readers, &folder.writers);
        state.pending_permission = Some(SharePermission::Read);
        tracing::debug!(
            "[SHARE] opened dialog for folder '{}' ({} readers, {} writers)",
            folder.name,
            folder.readers.len(),
            folder.writers.len()
        );
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().folder_id.is_some()
    }

    pub fn readers(&self) -> Vec<LookupUser> {
        self.state.lock().sets.readers().to_vec()
    }

    pub fn writers(&self) -> Vec<LookupUser> {
        self.state.lock().sets.writers().to_vec()
    }

    pub fn suggestions(&self) -> Vec<LookupUser> {
        self.state.lock().suggestions.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    pub fn is_lookup_loading(&self) -> bool {
        self.state.lock().loading_lookup
    }

    pub fn pending_permission(&self) -> Option<SharePermission> {
        self.state.lock().pending_permission
    }

    /// The permission the next looked-up user will be added with.
    pub fn set_pending_permission(&self, permission: SharePermission) {
        self.state.lock().pending_permission = Some(permission);
    }

    /// Username/address search input changed. The lookup itself is debounced
    /// (400 ms trailing): within a burst only the final value is dispatched.
    pub fn on_query_change(&self, input: &str) {
        let dispatch = {
            let mut state = self.state.lock();
            state.query = input.to_string();
            if input.trim().is_empty() {
                state.suggestions.clear();
                state.loading_lookup = false;
                // invalidate any in-flight lookup so a late response cannot
                // repopulate the cleared suggestions
                state.lookup_seq += 1;
                None
            } else {
                state.loading_lookup = true;
                state.lookup_seq += 1;
                Some((state.generation, state.lookup_seq, input.trim().to_string()))
            }
        };

        let Some((generation, seq, text)) = dispatch else {
            self.lookup_debounce.cancel_pending();
            return;
        };

        let state = self.state.clone();
        let client = self.client.clone();
        self.lookup_debounce.schedule(move || {
            smol::spawn(async move {
                let result = client.lookup_user(text).await;
                let mut state = state.lock();
                if state.generation != generation || state.lookup_seq != seq {
                    tracing::trace!("[SHARE] dropping superseded lookup response");
                    return;
                }
                state.loading_lookup = false;
                match result {
                    Ok(users) => state.suggestions = users,
                    Err(error) => {
                        tracing::error!("[SHARE] user lookup failed: {}", error);
                        state.suggestions.clear();
                    }
                }
            })
            .detach();
        });
    }

    /// A suggestion was picked: the user joins the set matching the pending
    /// permission level and the search resets.
    pub fn select_suggestion(&self, user: LookupUser) {
        self.lookup_debounce.cancel_pending();
        let mut state = self.state.lock();
        let permission = state.pending_permission.unwrap_or(SharePermission::Read);
        if state.sets.add(user, permission) {
            state.dirty = true;
        }
        state.query.clear();
        state.suggestions.clear();
        state.loading_lookup = false;
        // a lookup still in flight belongs to the query that was just
        // consumed; invalidate it
        state.lookup_seq += 1;
    }

    pub fn move_permission(&self, uuid: Uuid, to: SharePermission) {
        let mut state = self.state.lock();
        if state.sets.move_permission(uuid, to) {
            state.dirty = true;
        }
    }

    pub fn remove_user(&self, uuid: Uuid) {
        let mut state = self.state.lock();
        if state.sets.remove(uuid) {
            state.dirty = true;
        }
    }

    /// The share-link list was edited. Tracked separately from the
    /// permission sets: it enables the dialog's update affordance but adds
    /// nothing to the readers/writers payload.
    pub fn mark_links_touched(&self) {
        self.state.lock().links_touched = true;
    }

    pub fn links_touched(&self) -> bool {
        self.state.lock().links_touched
    }

    /// Close the dialog. With no permission changes this is silent; with
    /// changes the final sets go out as a single update and the dialog
    /// closes immediately, not waiting for confirmation. Returns whether an
    /// update was dispatched.
    pub fn close(&self) -> bool {
        self.lookup_debounce.cancel_pending();
        let mut state = self.state.lock();

        let update = if state.dirty {
            state.folder_id.clone().map(|folder_id| {
                (
                    folder_id,
                    state.sets.readers().to_vec(),
                    state.sets.writers().to_vec(),
                )
            })
        } else {
            None
        };
        state.reset();
        drop(state);

        let Some((folder_id, readers, writers)) = update else {
            return false;
        };

        let client = self.client.clone();
        let events = self.events.clone();
        smol::spawn(async move {
            let result = client
                .update_shared_folder(folder_id.clone(), readers, writers)
                .await
                .context("shared folder update");
            match result {
                Ok(()) => {
                    tracing::info!("[SHARE] updated collaborators for folder {}", folder_id)
                }
                Err(error) => {
                    tracing::error!("[SHARE] {:#}", error);
                    let _ = events.try_send(BrowserEvent::Notification {
                        message: format!("Failed to update shared folder: {:#}", error),
                    });
                }
            }
        })
        .detach();
        true
    }
}
