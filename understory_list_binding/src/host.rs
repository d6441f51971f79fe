// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The narrow interface to the widget that actually draws rows.

use alloc::boxed::Box;
use core::hash::Hash;

use kurbo::Size;

use crate::types::{IndexPath, RowAnimation, ScrollPosition};

/// One-shot notification delivered by the host once a visual transition settles.
///
/// If the host view is torn down first, the completion is simply dropped.
pub type Completion = Box<dyn FnOnce()>;

/// A scrollable table or grid widget driven by a [`ListManager`](crate::ListManager).
///
/// The manager owns its host and issues instructions to it after each store
/// mutation. In the other direction, the host's event loop calls back into the
/// manager for counts, sizes, views, and lifecycle notifications.
///
/// Hosts are expected to process instructions in the order received. Row and
/// section positions passed to `insert_*` are in post-mutation coordinates;
/// positions passed to `delete_*` are in pre-mutation coordinates.
pub trait ListHost {
    /// View type produced for a row.
    type Cell;
    /// View type produced for a section header.
    type Header;
    /// Key handed to content prefetchers (for example an image URL or record id).
    ///
    /// Hosts without prefetching can use `()`.
    type ContentKey: Clone + Eq + Hash;

    /// Discards every cached row and section and asks the manager again.
    fn reload_data(&mut self);

    /// Reloads everything and calls `completion` once the reload has settled.
    ///
    /// The default reloads and completes immediately, which suits hosts without
    /// animated transitions.
    fn reload_data_then(&mut self, completion: Completion) {
        self.reload_data();
        completion();
    }

    /// Opens a batch of incremental updates.
    fn begin_updates(&mut self);

    /// Closes a batch opened with [`ListHost::begin_updates`].
    fn end_updates(&mut self);

    /// Inserts rows at the given positions.
    fn insert_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Deletes rows at the given positions.
    fn delete_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Re-renders rows in place.
    fn reload_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Inserts whole sections.
    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Deletes whole sections.
    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Re-renders whole sections in place.
    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Scrolls until the row is visible at `position`.
    fn scroll_to_row(&mut self, row: IndexPath, position: ScrollPosition, animated: bool);

    /// Clears the selection highlight of a row.
    fn deselect_row(&mut self, row: IndexPath, animated: bool);

    /// Space available to rows, used as the constraint for sizable generators.
    ///
    /// The default is unbounded in both directions.
    fn viewport_size(&self) -> Size {
        Size::new(f64::INFINITY, f64::INFINITY)
    }
}
