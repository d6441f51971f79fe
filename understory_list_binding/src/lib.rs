// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_list_binding --heading-base-level=0

//! Understory List Binding: a headless section/row model for table and grid widgets.
//!
//! This crate binds an ordered, sectioned list of *generators* to a scrollable
//! widget. It owns the bookkeeping (which generator sits at which section and
//! row, which header owns which section) and translates every mutation into
//! the matching instruction for the widget. It is renderer-agnostic: the widget
//! is reached only through the [`ListHost`] trait.
//!
//! The core concepts are:
//!
//! - [`CellGenerator`] and [`HeaderGenerator`]: produce the view for one row or
//!   one section header and report sizes. Generators opt into optional
//!   behaviors ([`Selectable`], [`Movable`], [`Foldable`], [`Sizable`],
//!   [`IndexTitled`], [`Displayable`], [`Swipeable`], prefetch keys) through
//!   accessor methods; the resulting [`Capabilities`] set is used for filtering.
//! - [`SectionStore`]: the two-level container. Generators and headers are held
//!   in arenas and addressed by [`GeneratorId`] and [`HeaderId`]; every section
//!   is owned by exactly one header.
//! - [`ListManager`]: owns the store and the host. Mutations such as
//!   [`ListManager::insert_after`] or [`ListManager::remove`] update the store and
//!   then issue incremental updates to the host. Host callbacks such as
//!   [`ListManager::number_of_rows`] and [`ListManager::did_select_row`] are
//!   answered from the store.
//! - [`ListPlugin`]: optional behavior that listens on one channel
//!   ([`TableEvent`], [`ScrollEvent`], or [`PrefetchEvent`]) and forwards events to
//!   generator capabilities. See [`plugins`] for the ready-made ones.
//! - [`ListBuilder`]: wires a host, a [`ManagerConfig`], and plugins into a
//!   [`ListManager`].
//! - [`Event`]: the synchronous listener list used for every notification.
//!
//! Lookups that miss return [`ListError`]; host queries past the end of the
//! model answer empty defaults, since a widget's cached counts may briefly lag
//! the model during animated updates.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_list_binding::{
//!     CellGenerator, IndexPath, ListHost, ListManager, RowAnimation, ScrollPosition,
//! };
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl ListHost for Log {
//!     type Cell = String;
//!     type Header = String;
//!     type ContentKey = ();
//!
//!     fn reload_data(&mut self) { self.0.push("reload".into()); }
//!     fn begin_updates(&mut self) { self.0.push("begin".into()); }
//!     fn end_updates(&mut self) { self.0.push("end".into()); }
//!     fn insert_rows(&mut self, rows: &[IndexPath], _: RowAnimation) {
//!         self.0.push(format!("insert {rows:?}"));
//!     }
//!     fn delete_rows(&mut self, rows: &[IndexPath], _: RowAnimation) {
//!         self.0.push(format!("delete {rows:?}"));
//!     }
//!     fn reload_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
//!     fn insert_sections(&mut self, _: &[usize], _: RowAnimation) {}
//!     fn delete_sections(&mut self, _: &[usize], _: RowAnimation) {}
//!     fn reload_sections(&mut self, _: &[usize], _: RowAnimation) {}
//!     fn scroll_to_row(&mut self, _: IndexPath, _: ScrollPosition, _: bool) {}
//!     fn deselect_row(&mut self, _: IndexPath, _: bool) {}
//! }
//!
//! struct Text(&'static str);
//!
//! impl CellGenerator<Log> for Text {
//!     fn generate(&mut self, _host: &mut Log, _position: IndexPath) -> String {
//!         self.0.to_string()
//!     }
//! }
//!
//! let mut manager = ListManager::new(Log::default());
//! let a = manager.add_generator(Text("A"));
//! manager.add_generator(Text("C"));
//! manager.force_refill();
//!
//! manager.insert_after(a, Text("B"), RowAnimation::Fade).unwrap();
//!
//! assert_eq!(manager.number_of_sections(), 1);
//! assert_eq!(manager.number_of_rows(0), 3);
//! assert_eq!(manager.cell_for_row(IndexPath::new(0, 1)).as_deref(), Some("B"));
//! assert_eq!(manager.host().0, ["reload", "begin", "insert [IndexPath { section: 0, row: 1 }]", "end"]);
//! ```
//!
//! ## Reordering
//!
//! When the user drops a dragged row, the host calls [`ListManager::move_row`].
//! An accepted move updates the store immediately and fires
//! [`ListEvents::cell_changed_position`], but the host must not be asked to
//! re-layout while its own drag animation is still running. The manager records
//! a pending reconciliation instead; the host calls
//! [`ListManager::run_deferred_updates`] on its next event loop turn.
//!
//! ## Logging
//!
//! Structural mutations and move decisions are logged at `debug`, host callbacks
//! and plugin dispatch at `trace`, and lookups of missing generators at `warn`,
//! through the [`log`] facade. The crate never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod capability;
mod config;
mod data_source;
mod delegate;
mod error;
mod event;
mod generator;
mod host;
mod manager;
mod plugin;
pub mod plugins;
mod store;
mod types;

#[cfg(test)]
mod test_support;

pub use builder::ListBuilder;
pub use capability::{
    DisplayEvents, Displayable, FoldState, Foldable, IndexTitled, Movable, Selectable, Sizable,
    SwipeAction, SwipeActionStyle, SwipeActionsConfiguration, Swipeable,
};
pub use config::{MIN_HEADER_HEIGHT, ManagerConfig};
pub use data_source::ListDataSource;
pub use delegate::{ListDelegate, MoveOutcome};
pub use error::ListError;
pub use event::Event;
pub use generator::{CellGenerator, EmptyHeaderGenerator, HeaderGenerator};
pub use host::{Completion, ListHost};
pub use manager::{ListEvents, ListManager};
pub use plugin::{
    IndexPathBatch, ListPlugin, PluginCollection, PluginEvent, Plugins, PrefetchEvent,
    ScrollEvent, TableEvent,
};
pub use plugins::{
    ContentPrefetcher, DisplayablePlugin, FoldablePlugin, ItemTitlePlugin, PrefetchPlugin,
    SwipeActionsPlugin, SwipeEdge,
};
pub use store::{BoxedCell, BoxedHeader, Removed, Replaced, SectionStore};
pub use types::{Capabilities, GeneratorId, HeaderId, IndexPath, RowAnimation, ScrollPosition};
