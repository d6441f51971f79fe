// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plugin channels and ordered dispatch.
//!
//! A plugin listens on exactly one channel, chosen by its
//! [`ListPlugin::Event`] type:
//!
//! - [`TableEvent`]: row and header lifecycle, selection, and reordering.
//! - [`ScrollEvent`]: scroll offset and drag deceleration.
//! - [`PrefetchEvent`]: rows the host is about to need, or no longer needs.
//!
//! Plugins on a channel run in registration order and receive every event on
//! that channel together with the store, from which they resolve the affected
//! generators. A plugin that finds no matching capability does nothing.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

use crate::host::ListHost;
use crate::store::SectionStore;
use crate::types::IndexPath;

/// A short list of row positions, as delivered by the host in one callback.
pub type IndexPathBatch = SmallVec<[IndexPath; 8]>;

/// Row and header lifecycle on the table channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEvent {
    /// A row is about to become visible.
    WillDisplayCell(IndexPath),
    /// A row left the screen.
    DidEndDisplayCell(IndexPath),
    /// A section header is about to become visible.
    WillDisplayHeader(usize),
    /// A section header left the screen.
    DidEndDisplayHeader(usize),
    /// A row was selected.
    DidSelect(IndexPath),
    /// A row was moved by the user; the store already reflects the move.
    Move {
        /// Position before the move.
        from: IndexPath,
        /// Position after the move.
        to: IndexPath,
    },
}

/// Scroll-view notifications on the scroll channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    /// The content offset changed.
    DidScroll {
        /// New content offset.
        offset: Point,
    },
    /// The user lifted their finger after dragging.
    WillEndDragging {
        /// Drag velocity at release.
        velocity: Point,
    },
}

/// Prefetch hints on the prefetch channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrefetchEvent {
    /// The host expects to show these rows soon.
    Prefetch(IndexPathBatch),
    /// The host no longer expects to show these rows.
    CancelPrefetching(IndexPathBatch),
}

/// Optional behavior attached to a list through a [`ListBuilder`](crate::ListBuilder).
pub trait ListPlugin<H: ListHost> {
    /// The channel this plugin listens on.
    type Event: PluginEvent;

    /// Handles one event.
    fn process(&mut self, event: &Self::Event, store: &mut SectionStore<H>);
}

/// An event type that names a plugin channel.
///
/// Implemented for [`TableEvent`], [`ScrollEvent`], and [`PrefetchEvent`]; it
/// routes a plugin to the collection for its channel when the plugin is added.
pub trait PluginEvent: Sized + 'static {
    /// The collection of `plugins` that handles this event type.
    fn collection<H: ListHost>(plugins: &mut Plugins<H>) -> &mut PluginCollection<Self, H>;
}

impl PluginEvent for TableEvent {
    fn collection<H: ListHost>(plugins: &mut Plugins<H>) -> &mut PluginCollection<Self, H> {
        &mut plugins.table
    }
}

impl PluginEvent for ScrollEvent {
    fn collection<H: ListHost>(plugins: &mut Plugins<H>) -> &mut PluginCollection<Self, H> {
        &mut plugins.scroll
    }
}

impl PluginEvent for PrefetchEvent {
    fn collection<H: ListHost>(plugins: &mut Plugins<H>) -> &mut PluginCollection<Self, H> {
        &mut plugins.prefetch
    }
}

type BoxedPlugin<E, H> = Box<dyn ListPlugin<H, Event = E>>;

/// Plugins of one channel, in registration order.
pub struct PluginCollection<E, H: ListHost> {
    plugins: Vec<BoxedPlugin<E, H>>,
}

impl<E, H: ListHost> fmt::Debug for PluginCollection<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCollection")
            .field("len", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

impl<E, H: ListHost> Default for PluginCollection<E, H> {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }
}

impl<E: PluginEvent, H: ListHost> PluginCollection<E, H> {
    /// Appends a plugin. Duplicates are kept and run once per registration.
    pub fn add(&mut self, plugin: BoxedPlugin<E, H>) {
        self.plugins.push(plugin);
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` if no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Hands `event` to every plugin in registration order.
    pub fn process(&mut self, event: &E, store: &mut SectionStore<H>) {
        for plugin in &mut self.plugins {
            plugin.process(event, store);
        }
    }
}

/// The three plugin channels of a list.
pub struct Plugins<H: ListHost> {
    pub(crate) table: PluginCollection<TableEvent, H>,
    pub(crate) scroll: PluginCollection<ScrollEvent, H>,
    pub(crate) prefetch: PluginCollection<PrefetchEvent, H>,
}

impl<H: ListHost> fmt::Debug for Plugins<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugins")
            .field("table", &self.table)
            .field("scroll", &self.scroll)
            .field("prefetch", &self.prefetch)
            .finish()
    }
}

impl<H: ListHost> Default for Plugins<H> {
    fn default() -> Self {
        Self {
            table: PluginCollection::default(),
            scroll: PluginCollection::default(),
            prefetch: PluginCollection::default(),
        }
    }
}

impl<H: ListHost> Plugins<H> {
    /// Registers `plugin` on the channel named by its event type.
    pub fn add<P>(&mut self, plugin: P)
    where
        P: ListPlugin<H> + 'static,
    {
        P::Event::collection(self).add(Box::new(plugin));
    }

    /// Plugins on the table channel.
    #[must_use]
    pub fn table(&self) -> &PluginCollection<TableEvent, H> {
        &self.table
    }

    /// Plugins on the scroll channel.
    #[must_use]
    pub fn scroll(&self) -> &PluginCollection<ScrollEvent, H> {
        &self.scroll
    }

    /// Plugins on the prefetch channel.
    #[must_use]
    pub fn prefetch(&self) -> &PluginCollection<PrefetchEvent, H> {
        &self.prefetch
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use super::{ListPlugin, Plugins, ScrollEvent, TableEvent};
    use crate::store::SectionStore;
    use crate::test_support::RecordingHost;
    use crate::types::IndexPath;

    struct Tag {
        name: &'static str,
        seen: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ListPlugin<RecordingHost> for Tag {
        type Event = TableEvent;

        fn process(&mut self, _event: &TableEvent, _store: &mut SectionStore<RecordingHost>) {
            self.seen.borrow_mut().push(self.name);
        }
    }

    struct Offsets(Rc<RefCell<Vec<Point>>>);

    impl ListPlugin<RecordingHost> for Offsets {
        type Event = ScrollEvent;

        fn process(&mut self, event: &ScrollEvent, _store: &mut SectionStore<RecordingHost>) {
            if let ScrollEvent::DidScroll { offset } = event {
                self.0.borrow_mut().push(*offset);
            }
        }
    }

    #[test]
    fn plugins_route_by_event_type_and_run_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let mut plugins = Plugins::<RecordingHost>::default();
        plugins.add(Tag {
            name: "first",
            seen: Rc::clone(&seen),
        });
        plugins.add(Offsets(Rc::clone(&offsets)));
        plugins.add(Tag {
            name: "second",
            seen: Rc::clone(&seen),
        });
        assert_eq!(plugins.table().len(), 2);
        assert_eq!(plugins.scroll().len(), 1);
        assert!(plugins.prefetch().is_empty());

        let mut store = SectionStore::new();
        plugins
            .table
            .process(&TableEvent::DidSelect(IndexPath::new(0, 0)), &mut store);
        plugins.scroll.process(
            &ScrollEvent::DidScroll {
                offset: Point::new(0.0, 12.0),
            },
            &mut store,
        );

        assert_eq!(*seen.borrow(), ["first", "second"]);
        assert_eq!(*offsets.borrow(), [Point::new(0.0, 12.0)]);
    }
}
