// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful list manager: store mutations plus host instructions.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::builder::ListBuilder;
use crate::capability::SwipeActionsConfiguration;
use crate::config::ManagerConfig;
use crate::data_source::ListDataSource;
use crate::delegate::{ListDelegate, MoveOutcome};
use crate::error::ListError;
use crate::event::Event;
use crate::generator::{CellGenerator, HeaderGenerator};
use crate::host::ListHost;
use crate::plugin::IndexPathBatch;
use crate::plugins::SwipeEdge;
use crate::store::{BoxedCell, SectionStore};
use crate::types::{GeneratorId, HeaderId, IndexPath, RowAnimation, ScrollPosition};

/// Notifications a [`ListManager`] emits to outside observers.
#[derive(Debug, Default)]
pub struct ListEvents {
    /// Fired with the new content offset whenever the host scrolls.
    pub scroll: Event<Point>,
    /// Fired with the release velocity when the user stops dragging.
    pub will_end_dragging: Event<Point>,
    /// Fired with `(from, to)` after the user moved a row.
    pub cell_changed_position: Event<(IndexPath, IndexPath)>,
    /// Fired when the last row of the list is about to be shown.
    ///
    /// Fires once per distinct last row, so appending a page of rows re-arms it.
    pub last_cell_showing: Event<()>,
}

/// Binds a [`SectionStore`] to a [`ListHost`].
///
/// Mutations update the store and then tell the host what changed: appends are
/// silent until [`ListManager::force_refill`], inserts and removals issue
/// incremental row updates inside a begin/end bracket, and swaps reload
/// everything. Operations that look up a generator or header return
/// [`ListError`] when it is missing and leave both store and host untouched.
///
/// The host drives the other direction by calling the callback methods
/// (`number_of_rows`, `cell_for_row`, `did_select_row`, ...), which are answered
/// from the store and forwarded to plugins.
///
/// Build one with [`ListManager::builder`] to attach plugins, or with
/// [`ListManager::new`] for a bare manager.
#[derive(Debug)]
pub struct ListManager<H: ListHost> {
    host: H,
    store: SectionStore<H>,
    events: ListEvents,
    config: ManagerConfig,
    delegate: ListDelegate<H>,
    data_source: ListDataSource<H>,
    pending_reconcile: bool,
}

impl<H: ListHost> ListManager<H> {
    /// Starts building a manager for `host`.
    pub fn builder(host: H) -> ListBuilder<H> {
        ListBuilder::new(host)
    }

    /// Creates a manager with the default configuration and no plugins.
    pub fn new(host: H) -> Self {
        ListBuilder::new(host).build()
    }

    pub(crate) fn from_parts(
        host: H,
        config: ManagerConfig,
        delegate: ListDelegate<H>,
        data_source: ListDataSource<H>,
    ) -> Self {
        Self {
            host,
            store: SectionStore::new(),
            events: ListEvents::default(),
            config,
            delegate,
            data_source,
            pending_reconcile: false,
        }
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The store.
    #[must_use]
    pub fn store(&self) -> &SectionStore<H> {
        &self.store
    }

    /// The store, mutably.
    ///
    /// Changes made here are not reported to the host and skip
    /// [`CellGenerator::register`]; call [`ListManager::force_refill`] afterwards.
    pub fn store_mut(&mut self) -> &mut SectionStore<H> {
        &mut self.store
    }

    /// Events to subscribe to.
    #[must_use]
    pub fn events(&self) -> &ListEvents {
        &self.events
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The delegate half, holding the table and scroll plugins.
    #[must_use]
    pub fn delegate(&self) -> &ListDelegate<H> {
        &self.delegate
    }

    /// The data source half, holding the prefetch plugins.
    #[must_use]
    pub fn data_source(&self) -> &ListDataSource<H> {
        &self.data_source
    }

    // --- mutations ---

    /// Appends a header, opening a new trailing section for the generators added after it.
    pub fn add_section_header<G>(&mut self, header: G) -> HeaderId
    where
        G: HeaderGenerator<H> + 'static,
    {
        let id = self.store.push_header(Box::new(header));
        log::debug!("added header {id:?}");
        id
    }

    /// Appends a header like [`ListManager::add_section_header`] and animates its
    /// (empty) section in.
    pub fn insert_section_header<G>(&mut self, header: G, animation: RowAnimation) -> HeaderId
    where
        G: HeaderGenerator<H> + 'static,
    {
        let id = self.store.push_header(Box::new(header));
        let section = self.store.section_count() - 1;
        log::debug!("inserted header {id:?} as section {section}");
        self.host.begin_updates();
        self.host.insert_sections(&[section], animation);
        self.host.end_updates();
        id
    }

    /// Appends a generator to the last section.
    ///
    /// The host is not told; call [`ListManager::force_refill`] once the batch of
    /// additions is complete.
    pub fn add_generator<G>(&mut self, generator: G) -> GeneratorId
    where
        G: CellGenerator<H> + 'static,
    {
        generator.register(&mut self.host);
        let id = self.store.append(Box::new(generator));
        log::trace!("added generator {id:?}");
        id
    }

    /// Appends generators to the last section, in order.
    pub fn add_generators<I>(&mut self, generators: I) -> Vec<GeneratorId>
    where
        I: IntoIterator<Item = BoxedCell<H>>,
    {
        let ids: Vec<_> = generators
            .into_iter()
            .map(|generator| {
                generator.register(&mut self.host);
                self.store.append(generator)
            })
            .collect();
        log::debug!("added {} generators", ids.len());
        ids
    }

    /// Appends generators to the section owned by `header`, in order.
    pub fn add_generators_to_header<I>(
        &mut self,
        header: HeaderId,
        generators: I,
    ) -> Result<Vec<GeneratorId>, ListError>
    where
        I: IntoIterator<Item = BoxedCell<H>>,
    {
        if self.store.section_of(header).is_none() {
            log::warn!("add to missing header {header:?}");
            return Err(ListError::HeaderNotFound(header));
        }
        let mut ids = Vec::new();
        for generator in generators {
            generator.register(&mut self.host);
            ids.push(self.store.append_to_header(header, generator)?);
        }
        log::debug!("added {} generators to {header:?}", ids.len());
        Ok(ids)
    }

    /// Inserts generators right after `anchor`, keeping their order.
    ///
    /// Like [`ListManager::add_generators`], the host is not told.
    pub fn add_generators_after<I>(
        &mut self,
        anchor: GeneratorId,
        generators: I,
    ) -> Result<Vec<GeneratorId>, ListError>
    where
        I: IntoIterator<Item = BoxedCell<H>>,
    {
        let host = &mut self.host;
        let registered = generators.into_iter().map(|generator| {
            generator.register(host);
            generator
        });
        let ids = self
            .store
            .insert_all_after(anchor, registered)
            .inspect_err(|_| log::warn!("add after missing anchor {anchor:?}"))?;
        log::debug!("added {} generators after {anchor:?}", ids.len());
        Ok(ids)
    }

    /// Inserts a generator right after `anchor` and animates the new row in.
    pub fn insert_after<G>(
        &mut self,
        anchor: GeneratorId,
        generator: G,
        animation: RowAnimation,
    ) -> Result<GeneratorId, ListError>
    where
        G: CellGenerator<H> + 'static,
    {
        let at = self.anchor(anchor)?;
        self.insert_at(IndexPath::new(at.section, at.row + 1), generator, animation)
    }

    /// Inserts a generator right before `anchor` and animates the new row in.
    pub fn insert_before<G>(
        &mut self,
        anchor: GeneratorId,
        generator: G,
        animation: RowAnimation,
    ) -> Result<GeneratorId, ListError>
    where
        G: CellGenerator<H> + 'static,
    {
        let at = self.anchor(anchor)?;
        self.insert_at(at, generator, animation)
    }

    /// Inserts a generator as the first row of the section owned by `header`.
    pub fn insert_to_header<G>(
        &mut self,
        header: HeaderId,
        generator: G,
        animation: RowAnimation,
    ) -> Result<GeneratorId, ListError>
    where
        G: CellGenerator<H> + 'static,
    {
        let Some(section) = self.store.section_of(header) else {
            log::warn!("insert into missing header {header:?}");
            return Err(ListError::HeaderNotFound(header));
        };
        self.insert_at(IndexPath::new(section, 0), generator, animation)
    }

    /// Removes a generator and animates its row out.
    ///
    /// With `remove_empty_section`, a section left empty is deleted together
    /// with its header. With `scroll_to`, the host scrolls to the removed row's
    /// position if a row of the same section still occupies it; nothing scrolls
    /// when the section went away.
    pub fn remove(
        &mut self,
        id: GeneratorId,
        animation: RowAnimation,
        scroll_to: Option<ScrollPosition>,
        remove_empty_section: bool,
    ) -> Result<BoxedCell<H>, ListError> {
        let removed = self
            .store
            .remove(id, remove_empty_section)
            .inspect_err(|_| log::warn!("remove of missing generator {id:?}"))?;
        let position = removed.position;
        log::debug!(
            "removed {id:?} at {position:?}, section removed: {}",
            removed.section_removed
        );

        self.host.begin_updates();
        self.host.delete_rows(&[position], animation);
        if removed.section_removed {
            self.host.delete_sections(&[position.section], animation);
        }
        if let Some(scroll) = scroll_to
            && !removed.section_removed
            && self.store.id_at(position).is_some()
        {
            self.host.scroll_to_row(position, scroll, true);
        }
        self.host.end_updates();
        Ok(removed.generator)
    }

    /// Puts `generator` in place of `old`, animating the old row out and the new one in.
    pub fn replace<G>(
        &mut self,
        old: GeneratorId,
        generator: G,
        remove_animation: RowAnimation,
        insert_animation: RowAnimation,
    ) -> Result<GeneratorId, ListError>
    where
        G: CellGenerator<H> + 'static,
    {
        if !self.store.contains(old) {
            log::warn!("replace of missing generator {old:?}");
            return Err(ListError::GeneratorNotFound(old));
        }
        generator.register(&mut self.host);
        let replaced = self.store.replace(old, Box::new(generator))?;
        log::debug!("replaced {old:?} with {:?}", replaced.id);

        self.host.begin_updates();
        self.host.delete_rows(&[replaced.position], remove_animation);
        self.host.insert_rows(&[replaced.position], insert_animation);
        self.host.end_updates();
        Ok(replaced.id)
    }

    /// Exchanges the positions of two generators and reloads the host.
    pub fn swap(&mut self, a: GeneratorId, b: GeneratorId) -> Result<(), ListError> {
        let (pa, pb) = self
            .store
            .swap(a, b)
            .inspect_err(|err| log::warn!("swap failed: {err}"))?;
        log::debug!("swapped {pa:?} <-> {pb:?}");
        self.host.reload_data();
        Ok(())
    }

    /// Re-renders the rows of `ids` in place, without animation.
    ///
    /// Either every id is found and all rows reload, or nothing happens.
    pub fn update(&mut self, ids: &[GeneratorId]) -> Result<(), ListError> {
        let rows = ids
            .iter()
            .map(|id| {
                self.store
                    .position_of(*id)
                    .ok_or(ListError::GeneratorNotFound(*id))
            })
            .collect::<Result<IndexPathBatch, _>>()
            .inspect_err(|err| log::warn!("update failed: {err}"))?;
        if !rows.is_empty() {
            log::trace!("reloading {} rows", rows.len());
            self.host.reload_rows(&rows, RowAnimation::None);
        }
        Ok(())
    }

    /// Drops every generator and reloads the host. Headers and their sections stay.
    pub fn clear_generators(&mut self) {
        log::debug!("clearing {} generators", self.store.len());
        self.store.clear_generators();
        self.host.reload_data();
    }

    /// Drops every header and reloads the host; sections that still hold rows
    /// get an empty header.
    pub fn clear_headers(&mut self) {
        log::debug!("clearing {} headers", self.store.section_count());
        self.store.clear_headers();
        self.host.reload_data();
    }

    /// Drops every generator in the section owned by `header`, returning them.
    ///
    /// The section stays; its rows are animated out.
    pub fn remove_all_generators_in(
        &mut self,
        header: HeaderId,
        animation: RowAnimation,
    ) -> Result<Vec<BoxedCell<H>>, ListError> {
        let Some(section) = self.store.section_of(header) else {
            log::warn!("clear of missing header {header:?}");
            return Err(ListError::HeaderNotFound(header));
        };
        let removed = self.store.remove_all_in(header)?;
        log::debug!("removed {} generators from {header:?}", removed.len());
        if !removed.is_empty() {
            let rows: IndexPathBatch = (0..removed.len())
                .map(|row| IndexPath::new(section, row))
                .collect();
            self.host.begin_updates();
            self.host.delete_rows(&rows, animation);
            self.host.end_updates();
        }
        Ok(removed)
    }

    /// Re-renders the section owned by `header`.
    pub fn reload_section(
        &mut self,
        header: HeaderId,
        animation: RowAnimation,
    ) -> Result<(), ListError> {
        let section = self
            .store
            .section_of(header)
            .ok_or(ListError::HeaderNotFound(header))?;
        self.host.reload_sections(&[section], animation);
        Ok(())
    }

    /// Tells the host to reload everything.
    pub fn force_refill(&mut self) {
        log::trace!("force refill");
        self.host.reload_data();
    }

    /// Reloads everything and calls `completion` once the host has settled.
    pub fn force_refill_then(&mut self, completion: impl FnOnce() + 'static) {
        log::trace!("force refill with completion");
        self.host.reload_data_then(Box::new(completion));
    }

    /// Scrolls the host to the row of `id`.
    pub fn scroll_to(
        &mut self,
        id: GeneratorId,
        position: ScrollPosition,
        animated: bool,
    ) -> Result<(), ListError> {
        let row = self.anchor(id)?;
        self.host.scroll_to_row(row, position, animated);
        Ok(())
    }

    /// Flips a foldable generator's expansion state.
    ///
    /// Returns the new state, or `None` if the generator is not foldable. The
    /// store is not restructured.
    pub fn toggle_fold(&mut self, id: GeneratorId) -> Result<Option<bool>, ListError> {
        let generator = self
            .store
            .generator_mut(id)
            .ok_or(ListError::GeneratorNotFound(id))?;
        let expanded = generator.as_foldable_mut().map(|foldable| foldable.toggle());
        log::debug!("toggled fold of {id:?}: {expanded:?}");
        Ok(expanded)
    }

    fn anchor(&self, id: GeneratorId) -> Result<IndexPath, ListError> {
        self.store.position_of(id).ok_or_else(|| {
            log::warn!("missing generator {id:?}");
            ListError::GeneratorNotFound(id)
        })
    }

    fn insert_at<G>(
        &mut self,
        position: IndexPath,
        generator: G,
        animation: RowAnimation,
    ) -> Result<GeneratorId, ListError>
    where
        G: CellGenerator<H> + 'static,
    {
        generator.register(&mut self.host);
        let id = self.store.insert_at(position, Box::new(generator))?;
        log::debug!("inserted {id:?} at {position:?}");
        self.host.begin_updates();
        self.host.insert_rows(&[position], animation);
        self.host.end_updates();
        Ok(id)
    }

    // --- host callbacks ---

    /// Number of sections to show.
    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        self.data_source
            .number_of_sections(&self.store, &self.config)
    }

    /// Number of rows in `section`; zero past the end.
    #[must_use]
    pub fn number_of_rows(&self, section: usize) -> usize {
        self.data_source.number_of_rows(&self.store, section)
    }

    /// Builds the view for the row at `position`, or `None` past the end.
    pub fn cell_for_row(&mut self, position: IndexPath) -> Option<H::Cell> {
        self.data_source
            .cell_for_row(&mut self.store, &mut self.host, position)
    }

    /// Builds the header view for `section`, or `None` for an invisible or missing header.
    pub fn header_view(&mut self, section: usize) -> Option<H::Header> {
        self.delegate
            .header_view(&mut self.store, &mut self.host, section)
    }

    /// Header height for `section`, never below the configured floor.
    #[must_use]
    pub fn header_height(&self, section: usize) -> f64 {
        self.delegate
            .header_height(&self.store, &self.host, &self.config, section)
    }

    /// Row height for `position`.
    ///
    /// Sizable generators are measured against the host's viewport; otherwise
    /// the generator's own height is used, then the configured default.
    #[must_use]
    pub fn row_height(&self, position: IndexPath) -> f64 {
        self.delegate
            .row_height(&self.store, &self.host, &self.config, position)
    }

    /// Estimated row height for `position`.
    #[must_use]
    pub fn estimated_row_height(&self, position: IndexPath) -> f64 {
        self.delegate
            .estimated_row_height(&self.store, &self.config, position)
    }

    /// The user selected the row at `position`.
    pub fn did_select_row(&mut self, position: IndexPath) {
        self.delegate
            .did_select(&mut self.store, &mut self.host, position);
    }

    /// Whether the row at `position` may be dragged.
    #[must_use]
    pub fn can_move_row(&self, position: IndexPath) -> bool {
        self.delegate.can_move(&self.store, position)
    }

    /// Where a row dragged from `from` may be dropped when hovering over `proposed`.
    #[must_use]
    pub fn target_for_move(&self, from: IndexPath, proposed: IndexPath) -> IndexPath {
        self.delegate.target_for_move(&self.store, from, proposed)
    }

    /// The user dropped the row at `from` onto `to`.
    ///
    /// An accepted move updates the store right away and schedules a
    /// reconciliation: the host must call [`ListManager::run_deferred_updates`]
    /// on its next event loop turn, after the drag has finished.
    pub fn move_row(&mut self, from: IndexPath, to: IndexPath) -> MoveOutcome {
        let outcome = self
            .delegate
            .move_row(&mut self.store, &self.events, from, to);
        if matches!(outcome, MoveOutcome::Moved { .. }) {
            self.pending_reconcile = true;
        }
        outcome
    }

    /// Whether a move is waiting for [`ListManager::run_deferred_updates`].
    #[must_use]
    pub fn has_pending_reconciliation(&self) -> bool {
        self.pending_reconcile
    }

    /// Runs the reconciliation scheduled by an accepted move.
    ///
    /// Issues an empty begin/end update bracket so the host re-reads row
    /// geometry. Returns `false` if nothing was pending.
    pub fn run_deferred_updates(&mut self) -> bool {
        if !core::mem::take(&mut self.pending_reconcile) {
            return false;
        }
        log::trace!("reconciling after move");
        self.host.begin_updates();
        self.host.end_updates();
        true
    }

    /// The row at `position` is about to become visible.
    pub fn will_display_cell(&mut self, position: IndexPath) {
        self.delegate
            .will_display_cell(&mut self.store, &self.events, position);
    }

    /// The row at `position` left the screen.
    pub fn did_end_display_cell(&mut self, position: IndexPath) {
        self.delegate
            .did_end_display_cell(&mut self.store, position);
    }

    /// The header of `section` is about to become visible.
    pub fn will_display_header(&mut self, section: usize) {
        self.delegate
            .will_display_header(&mut self.store, section);
    }

    /// The header of `section` left the screen.
    pub fn did_end_display_header(&mut self, section: usize) {
        self.delegate
            .did_end_display_header(&mut self.store, section);
    }

    /// The host scrolled to `offset`.
    pub fn did_scroll(&mut self, offset: Point) {
        self.delegate
            .did_scroll(&mut self.store, &self.events, offset);
    }

    /// The user released a drag with `velocity`.
    pub fn will_end_dragging(&mut self, velocity: Point) {
        self.delegate
            .will_end_dragging(&mut self.store, &self.events, velocity);
    }

    /// The host expects to show `rows` soon.
    pub fn prefetch_rows(&mut self, rows: &[IndexPath]) {
        self.data_source.prefetch_rows(&mut self.store, rows);
    }

    /// The host no longer expects to show `rows`.
    pub fn cancel_prefetching(&mut self, rows: &[IndexPath]) {
        self.data_source
            .cancel_prefetching(&mut self.store, rows);
    }

    /// Jump-list titles; empty unless an [`ItemTitlePlugin`](crate::ItemTitlePlugin) is installed.
    #[must_use]
    pub fn index_titles(&self) -> Vec<String> {
        self.delegate.index_titles(&self.store)
    }

    /// Position of the first row titled `title` in the jump list.
    #[must_use]
    pub fn position_for_index_title(&self, title: &str) -> Option<IndexPath> {
        self.delegate
            .position_for_index_title(&self.store, title)
    }

    /// Swipe actions of the row at `position`; `None` unless a
    /// [`SwipeActionsPlugin`](crate::SwipeActionsPlugin) is installed.
    #[must_use]
    pub fn swipe_actions(
        &self,
        position: IndexPath,
        edge: SwipeEdge,
    ) -> Option<&SwipeActionsConfiguration> {
        self.delegate
            .swipe_configuration(&self.store, position, edge)
    }

    /// The user performed the swipe action at `index` on `edge` of the row at `position`.
    pub fn perform_swipe_action(&mut self, position: IndexPath, edge: SwipeEdge, index: usize) -> bool {
        self.delegate
            .perform_swipe_action(&self.store, position, edge, index)
    }
}
