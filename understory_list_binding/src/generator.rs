// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and header generators.

use crate::capability::{
    Displayable, Foldable, IndexTitled, Movable, Selectable, Sizable, Swipeable,
};
use crate::config::MIN_HEADER_HEIGHT;
use crate::host::ListHost;
use crate::types::{Capabilities, IndexPath};

/// Binds one row's model to a host view.
///
/// Only [`CellGenerator::generate`] is required. Every capability accessor
/// defaults to `None`; implement the matching trait (such as
/// [`Selectable`] or [`Foldable`]) and return `Some(self)` to opt in.
///
/// ```rust
/// use understory_list_binding::{CellGenerator, Event, IndexPath, ListHost, Selectable};
///
/// struct TitleRow {
///     title: String,
///     did_select: Event<()>,
/// }
///
/// impl Selectable for TitleRow {
///     fn did_select_event(&self) -> &Event<()> {
///         &self.did_select
///     }
/// }
///
/// impl<H: ListHost<Cell = String>> CellGenerator<H> for TitleRow {
///     fn generate(&mut self, _host: &mut H, _position: IndexPath) -> String {
///         self.title.clone()
///     }
///
///     fn as_selectable(&self) -> Option<&dyn Selectable> {
///         Some(self)
///     }
/// }
/// ```
pub trait CellGenerator<H: ListHost> {
    /// Builds or configures the view for this row.
    fn generate(&mut self, host: &mut H, position: IndexPath) -> H::Cell;

    /// Registers reusable view types with the host.
    ///
    /// Called once when the generator enters a list through the manager.
    fn register(&self, host: &mut H) {
        let _ = host;
    }

    /// Fixed row height, if the generator knows it.
    fn cell_height(&self) -> Option<f64> {
        None
    }

    /// Estimated row height used before the row is laid out.
    fn estimated_cell_height(&self) -> Option<f64> {
        None
    }

    /// Content key for prefetching, if the row has remote content.
    fn prefetch_key(&self) -> Option<H::ContentKey> {
        None
    }

    /// Selection capability.
    fn as_selectable(&self) -> Option<&dyn Selectable> {
        None
    }

    /// Drag-reorder capability.
    fn as_movable(&self) -> Option<&dyn Movable> {
        None
    }

    /// Folding capability.
    fn as_foldable(&self) -> Option<&dyn Foldable> {
        None
    }

    /// Folding capability, mutably. Must agree with [`CellGenerator::as_foldable`].
    fn as_foldable_mut(&mut self) -> Option<&mut dyn Foldable> {
        None
    }

    /// Self-sizing capability.
    fn as_sizable(&self) -> Option<&dyn Sizable> {
        None
    }

    /// Jump-list title capability.
    fn as_index_titled(&self) -> Option<&dyn IndexTitled> {
        None
    }

    /// Display lifecycle capability.
    fn as_displayable(&self) -> Option<&dyn Displayable> {
        None
    }

    /// Swipe actions capability.
    fn as_swipeable(&self) -> Option<&dyn Swipeable> {
        None
    }

    /// The capability set advertised by the accessors above.
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::SELECTABLE, self.as_selectable().is_some());
        caps.set(Capabilities::MOVABLE, self.as_movable().is_some());
        caps.set(Capabilities::FOLDABLE, self.as_foldable().is_some());
        caps.set(Capabilities::SIZABLE, self.as_sizable().is_some());
        caps.set(Capabilities::INDEX_TITLED, self.as_index_titled().is_some());
        caps.set(Capabilities::DISPLAYABLE, self.as_displayable().is_some());
        caps.set(Capabilities::PREFETCHABLE, self.prefetch_key().is_some());
        caps.set(Capabilities::SWIPEABLE, self.as_swipeable().is_some());
        caps
    }
}

/// Binds one section header to a host view.
pub trait HeaderGenerator<H: ListHost> {
    /// Builds the header view, or `None` for an invisible header.
    fn generate(&mut self, host: &mut H, section: usize) -> Option<H::Header>;

    /// Header height for `section`.
    fn height(&self, host: &H, section: usize) -> f64;

    /// Display lifecycle capability.
    fn as_displayable(&self) -> Option<&dyn Displayable> {
        None
    }
}

/// Placeholder header for sections created without an explicit header.
///
/// Produces no view and reports [`MIN_HEADER_HEIGHT`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmptyHeaderGenerator;

impl<H: ListHost> HeaderGenerator<H> for EmptyHeaderGenerator {
    fn generate(&mut self, _host: &mut H, _section: usize) -> Option<H::Header> {
        None
    }

    fn height(&self, _host: &H, _section: usize) -> f64 {
        MIN_HEADER_HEIGHT
    }
}
