// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks about geometry, selection, reordering, display, and scrolling.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::capability::{Movable, SwipeActionsConfiguration};
use crate::config::ManagerConfig;
use crate::host::ListHost;
use crate::manager::ListEvents;
use crate::plugin::{PluginCollection, ScrollEvent, TableEvent};
use crate::plugins::{ItemTitlePlugin, SwipeActionsPlugin, SwipeEdge};
use crate::store::SectionStore;
use crate::types::{GeneratorId, IndexPath};

/// Result of a user-driven row move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The row may not go there; the store is unchanged.
    Rejected,
    /// The store now holds the row at `to`.
    Moved {
        /// Position before the move.
        from: IndexPath,
        /// Position after the move, after clamping to the destination section.
        to: IndexPath,
    },
}

/// Answers the host's delegate-style callbacks for a [`ListManager`](crate::ListManager).
///
/// Holds the table and scroll plugin channels and the optional feature plugins.
/// The manager owns one delegate and forwards the matching host callbacks to it.
pub struct ListDelegate<H: ListHost> {
    pub(crate) table: PluginCollection<TableEvent, H>,
    pub(crate) scroll: PluginCollection<ScrollEvent, H>,
    pub(crate) item_titles: Option<ItemTitlePlugin>,
    pub(crate) swipe_actions: Option<SwipeActionsPlugin>,
    // Last row `last_cell_showing` fired for.
    last_shown: Option<GeneratorId>,
}

impl<H: ListHost> fmt::Debug for ListDelegate<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDelegate")
            .field("table", &self.table)
            .field("scroll", &self.scroll)
            .field("item_titles", &self.item_titles)
            .field("swipe_actions", &self.swipe_actions)
            .field("last_shown", &self.last_shown)
            .finish()
    }
}

fn movable<H: ListHost>(store: &SectionStore<H>, position: IndexPath) -> Option<&dyn Movable> {
    store.generator_at(position)?.as_movable()
}

impl<H: ListHost> ListDelegate<H> {
    pub(crate) fn new(
        table: PluginCollection<TableEvent, H>,
        scroll: PluginCollection<ScrollEvent, H>,
        item_titles: Option<ItemTitlePlugin>,
        swipe_actions: Option<SwipeActionsPlugin>,
    ) -> Self {
        Self {
            table,
            scroll,
            item_titles,
            swipe_actions,
            last_shown: None,
        }
    }

    /// Plugins on the table channel.
    #[must_use]
    pub fn table_plugins(&self) -> &PluginCollection<TableEvent, H> {
        &self.table
    }

    /// Plugins on the scroll channel.
    #[must_use]
    pub fn scroll_plugins(&self) -> &PluginCollection<ScrollEvent, H> {
        &self.scroll
    }

    /// The jump-list plugin, if installed.
    #[must_use]
    pub fn item_titles(&self) -> Option<&ItemTitlePlugin> {
        self.item_titles.as_ref()
    }

    /// The swipe actions plugin, if installed.
    #[must_use]
    pub fn swipe_actions(&self) -> Option<&SwipeActionsPlugin> {
        self.swipe_actions.as_ref()
    }

    // --- geometry ---

    pub(crate) fn row_height(
        &self,
        store: &SectionStore<H>,
        host: &H,
        config: &ManagerConfig,
        position: IndexPath,
    ) -> f64 {
        let Some(generator) = store.generator_at(position) else {
            return config.row_height;
        };
        if let Some(sizable) = generator.as_sizable() {
            return sizable.size(host.viewport_size()).height;
        }
        generator.cell_height().unwrap_or(config.row_height)
    }

    pub(crate) fn estimated_row_height(
        &self,
        store: &SectionStore<H>,
        config: &ManagerConfig,
        position: IndexPath,
    ) -> f64 {
        store
            .generator_at(position)
            .and_then(|generator| generator.estimated_cell_height())
            .unwrap_or(config.estimated_row_height)
    }

    pub(crate) fn header_height(
        &self,
        store: &SectionStore<H>,
        host: &H,
        config: &ManagerConfig,
        section: usize,
    ) -> f64 {
        store
            .header_at(section)
            .map_or(config.min_header_height, |header| {
                header.height(host, section).max(config.min_header_height)
            })
    }

    pub(crate) fn header_view(
        &self,
        store: &mut SectionStore<H>,
        host: &mut H,
        section: usize,
    ) -> Option<H::Header> {
        store.header_at_mut(section)?.generate(host, section)
    }

    // --- selection ---

    pub(crate) fn did_select(
        &mut self,
        store: &mut SectionStore<H>,
        host: &mut H,
        position: IndexPath,
    ) {
        log::trace!("did select {position:?}");
        self.table.process(&TableEvent::DidSelect(position), store);
        let Some(selectable) = store
            .generator_at(position)
            .and_then(|generator| generator.as_selectable())
        else {
            return;
        };
        selectable.did_select_event().invoke(&());
        if selectable.needs_deselect() {
            host.deselect_row(position, true);
        }
    }

    // --- reordering ---

    pub(crate) fn can_move(&self, store: &SectionStore<H>, position: IndexPath) -> bool {
        movable(store, position).is_some_and(|movable| movable.can_move())
    }

    pub(crate) fn target_for_move(
        &self,
        store: &SectionStore<H>,
        from: IndexPath,
        proposed: IndexPath,
    ) -> IndexPath {
        let allowed = movable(store, from).is_some_and(|movable| {
            from.section == proposed.section || movable.can_move_in_other_section()
        });
        if allowed { proposed } else { from }
    }

    pub(crate) fn move_row(
        &mut self,
        store: &mut SectionStore<H>,
        events: &ListEvents,
        from: IndexPath,
        to: IndexPath,
    ) -> MoveOutcome {
        let permitted = movable(store, from).is_some_and(|movable| {
            movable.can_move()
                && (from.section == to.section || movable.can_move_in_other_section())
        });
        if !permitted {
            log::debug!("move {from:?} -> {to:?} rejected");
            return MoveOutcome::Rejected;
        }
        let to = match store.move_row(from, to) {
            Ok(to) => to,
            Err(err) => {
                log::warn!("move {from:?} -> {to:?} failed: {err}");
                return MoveOutcome::Rejected;
            }
        };
        log::debug!("moved row {from:?} -> {to:?}");
        events.cell_changed_position.invoke(&(from, to));
        self.table.process(&TableEvent::Move { from, to }, store);
        MoveOutcome::Moved { from, to }
    }

    // --- display lifecycle ---

    pub(crate) fn will_display_cell(
        &mut self,
        store: &mut SectionStore<H>,
        events: &ListEvents,
        position: IndexPath,
    ) {
        self.table
            .process(&TableEvent::WillDisplayCell(position), store);
        if store.last_position() != Some(position) {
            return;
        }
        let id = store.id_at(position);
        if id != self.last_shown {
            self.last_shown = id;
            log::trace!("last cell showing at {position:?}");
            events.last_cell_showing.invoke(&());
        }
    }

    pub(crate) fn did_end_display_cell(&mut self, store: &mut SectionStore<H>, position: IndexPath) {
        self.table
            .process(&TableEvent::DidEndDisplayCell(position), store);
    }

    pub(crate) fn will_display_header(&mut self, store: &mut SectionStore<H>, section: usize) {
        self.table
            .process(&TableEvent::WillDisplayHeader(section), store);
    }

    pub(crate) fn did_end_display_header(&mut self, store: &mut SectionStore<H>, section: usize) {
        self.table
            .process(&TableEvent::DidEndDisplayHeader(section), store);
    }

    // --- scrolling ---

    pub(crate) fn did_scroll(
        &mut self,
        store: &mut SectionStore<H>,
        events: &ListEvents,
        offset: Point,
    ) {
        events.scroll.invoke(&offset);
        self.scroll.process(&ScrollEvent::DidScroll { offset }, store);
    }

    pub(crate) fn will_end_dragging(
        &mut self,
        store: &mut SectionStore<H>,
        events: &ListEvents,
        velocity: Point,
    ) {
        events.will_end_dragging.invoke(&velocity);
        self.scroll
            .process(&ScrollEvent::WillEndDragging { velocity }, store);
    }

    // --- feature plugins ---

    pub(crate) fn index_titles(&self, store: &SectionStore<H>) -> Vec<String> {
        self.item_titles
            .map(|plugin| plugin.index_titles(store))
            .unwrap_or_default()
    }

    pub(crate) fn position_for_index_title(
        &self,
        store: &SectionStore<H>,
        title: &str,
    ) -> Option<IndexPath> {
        self.item_titles?.position_for_index_title(store, title)
    }

    pub(crate) fn swipe_configuration<'a>(
        &self,
        store: &'a SectionStore<H>,
        position: IndexPath,
        edge: SwipeEdge,
    ) -> Option<&'a SwipeActionsConfiguration> {
        self.swipe_actions?.configuration(store, position, edge)
    }

    pub(crate) fn perform_swipe_action(
        &self,
        store: &SectionStore<H>,
        position: IndexPath,
        edge: SwipeEdge,
        index: usize,
    ) -> bool {
        self.swipe_actions
            .is_some_and(|plugin| plugin.perform(store, position, edge, index))
    }
}
