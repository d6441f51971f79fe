// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the list model: handles, positions, capability flags, and host hints.

/// Identifier for a cell generator held by a [`SectionStore`](crate::SectionStore).
///
/// Identifiers are handed out when a generator enters the store and are never
/// reused, so an id whose generator was removed stays "not found" forever.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GeneratorId(pub(crate) u64);

/// Identifier for a section header generator held by a [`SectionStore`](crate::SectionStore).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct HeaderId(pub(crate) u64);

/// Position of a row: section index plus row index within that section.
///
/// Positions shift as rows and sections are inserted or removed. Hold on to a
/// [`GeneratorId`] and resolve it with
/// [`SectionStore::position_of`](crate::SectionStore::position_of) instead of
/// caching an `IndexPath`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Row index within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates a position from a section and a row.
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

bitflags::bitflags! {
    /// Optional behaviors a cell generator implements.
    ///
    /// The set is derived from the generator's capability accessors (see
    /// [`CellGenerator::capabilities`](crate::CellGenerator::capabilities)) and is
    /// used to filter generators without probing each accessor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Fires a notification when its row is selected.
        const SELECTABLE    = 0b0000_0001;
        /// May be dragged to another position.
        const MOVABLE       = 0b0000_0010;
        /// Owns child generators and an expanded/collapsed flag.
        const FOLDABLE      = 0b0000_0100;
        /// Computes its own size from constraints.
        const SIZABLE       = 0b0000_1000;
        /// Contributes a jump-list title.
        const INDEX_TITLED  = 0b0001_0000;
        /// Observes will-display / did-end-display.
        const DISPLAYABLE   = 0b0010_0000;
        /// Exposes a content key for prefetching.
        const PREFETCHABLE  = 0b0100_0000;
        /// Offers swipe actions.
        const SWIPEABLE     = 0b1000_0000;
    }
}

/// Animation hint passed to the host with incremental updates.
///
/// The host maps these onto whatever transitions its toolkit supports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowAnimation {
    /// No animation.
    None,
    /// Cross-fade.
    Fade,
    /// Slide in from / out to the right.
    Right,
    /// Slide in from / out to the left.
    Left,
    /// Slide in from / out to the top.
    Top,
    /// Slide in from / out to the bottom.
    Bottom,
    /// Keep the row centered while it expands or collapses.
    Middle,
    /// Let the host pick.
    #[default]
    Automatic,
}

/// Where a row should end up in the viewport after a scroll instruction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPosition {
    /// Scroll the minimum amount to make the row visible.
    #[default]
    None,
    /// Align the row with the top of the viewport.
    Top,
    /// Center the row in the viewport.
    Middle,
    /// Align the row with the bottom of the viewport.
    Bottom,
}
