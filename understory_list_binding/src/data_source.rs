// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks about counts, row views, and prefetching.

use core::fmt;

use crate::config::ManagerConfig;
use crate::host::ListHost;
use crate::plugin::{PluginCollection, PrefetchEvent};
use crate::store::SectionStore;
use crate::types::IndexPath;

/// Answers the host's data-source-style callbacks for a [`ListManager`](crate::ListManager).
///
/// Queries past the end of the store answer zero or `None`: a host's cached
/// counts may lag the model while an animated update is running.
pub struct ListDataSource<H: ListHost> {
    pub(crate) prefetch: PluginCollection<PrefetchEvent, H>,
}

impl<H: ListHost> fmt::Debug for ListDataSource<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDataSource")
            .field("prefetch", &self.prefetch)
            .finish()
    }
}

impl<H: ListHost> ListDataSource<H> {
    pub(crate) fn new(prefetch: PluginCollection<PrefetchEvent, H>) -> Self {
        Self { prefetch }
    }

    /// Plugins on the prefetch channel.
    #[must_use]
    pub fn prefetch_plugins(&self) -> &PluginCollection<PrefetchEvent, H> {
        &self.prefetch
    }

    pub(crate) fn number_of_sections(&self, store: &SectionStore<H>, config: &ManagerConfig) -> usize {
        let sections = store.section_count();
        if config.always_one_section {
            sections.max(1)
        } else {
            sections
        }
    }

    pub(crate) fn number_of_rows(&self, store: &SectionStore<H>, section: usize) -> usize {
        store.row_count(section)
    }

    pub(crate) fn cell_for_row(
        &self,
        store: &mut SectionStore<H>,
        host: &mut H,
        position: IndexPath,
    ) -> Option<H::Cell> {
        let Some(generator) = store.generator_at_mut(position) else {
            log::trace!("no row at {position:?}");
            return None;
        };
        Some(generator.generate(host, position))
    }

    pub(crate) fn prefetch_rows(&mut self, store: &mut SectionStore<H>, rows: &[IndexPath]) {
        if self.prefetch.is_empty() || rows.is_empty() {
            return;
        }
        let event = PrefetchEvent::Prefetch(rows.iter().copied().collect());
        self.prefetch.process(&event, store);
    }

    pub(crate) fn cancel_prefetching(&mut self, store: &mut SectionStore<H>, rows: &[IndexPath]) {
        if self.prefetch.is_empty() || rows.is_empty() {
            return;
        }
        let event = PrefetchEvent::CancelPrefetching(rows.iter().copied().collect());
        self.prefetch.process(&event, store);
    }
}
