//! Selection tracking for the listing view.
//!
//! Membership is by `(cid, name)` identity, never by CID alone: a file pinned
//! under two names is two selectable entries. The model keeps an anchor (the
//! last explicitly clicked item) for shift-click range extension.

use storage_api::{FileSystemItem, ItemKey};

#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    selected: Vec<ItemKey>,
    anchor: Option<ItemKey>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ItemKey] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, item: &ItemKey) -> bool {
        self.selected.contains(item)
    }

    /// Plain click: the selection becomes the singleton `{item}`.
    pub fn select(&mut self, item: ItemKey) {
        self.selected.clear();
        self.selected.push(item.clone());
        self.anchor = Some(item);
    }

    /// Ctrl/Cmd click: add or remove `item` without clearing the rest.
    /// A toggle-toggle pair on the same item restores the prior selection.
    pub fn toggle(&mut self, item: ItemKey) {
        match self.selected.iter().position(|s| *s == item) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(item.clone()),
        }
        self.anchor = Some(item);
    }

    /// Shift click: select the contiguous range of `ordered` between the
    /// anchor and `item`, inclusive, whichever side of the anchor the item
    /// falls on. Without an anchor (or when either endpoint is no longer
    /// listed) this degrades to a toggle.
    pub fn extend_range(&mut self, item: ItemKey, ordered: &[FileSystemItem]) {
        let Some(anchor) = self.anchor.clone() else {
            self.toggle(item);
            return;
        };

        let anchor_index = ordered.iter().position(|f| f.key() == anchor);
        let item_index = ordered.iter().position(|f| f.key() == item);
        match (anchor_index, item_index) {
            (Some(a), Some(b)) => {
                let (low, high) = if a <= b { (a, b) } else { (b, a) };
                self.selected = ordered[low..=high].iter().map(|f| f.key()).collect();
            }
            _ => self.toggle(item),
        }
    }

    /// Prune the selection to the currently rendered list. The selection is
    /// always a subset of the backing list; the owning view must call this
    /// whenever the list contents change.
    pub fn retain_listed(&mut self, listed: &[FileSystemItem]) {
        self.selected
            .retain(|s| listed.iter().any(|f| f.key() == *s));
        if let Some(anchor) = &self.anchor {
            if !listed.iter().any(|f| f.key() == *anchor) {
                self.anchor = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }
}
