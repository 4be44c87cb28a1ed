//! Client-side ordering of the loaded page and search classification.
//!
//! Sorting applies to the currently loaded page only. The pager holds one
//! page at a time, so items are never reordered across page boundaries; the
//! server decides which items land on which page.

use std::cmp::Ordering;

use storage_api::{FileSystemItem, SortColumn, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header click: the active column flips direction, a different column
    /// becomes active and resets to descending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.column = column;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Order the loaded page in place according to `sort`.
pub fn sort_page(items: &mut [FileSystemItem], sort: SortState) {
    items.sort_by(|a, b| {
        let ordering = match sort.column {
            // missing sizes sort below any known size
            SortColumn::Size => a.size.cmp(&b.size),
            SortColumn::Name => compare_names(&a.name, &b.name),
            SortColumn::Date => a.created.cmp(&b.created),
        };
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Case-insensitive name ordering, approximating the locale-aware
/// comparison used by the listing UI. Raw order breaks ties so equal
/// lowercase forms still sort deterministically.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
