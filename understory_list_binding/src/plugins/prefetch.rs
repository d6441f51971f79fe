// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::host::ListHost;
use crate::plugin::{IndexPathBatch, ListPlugin, PrefetchEvent};
use crate::store::SectionStore;

/// Loads remote content ahead of display, for example an image cache.
pub trait ContentPrefetcher {
    /// Key identifying one piece of content.
    type Key;

    /// Starts loading content for `keys`.
    fn start_prefetching(&mut self, keys: &[Self::Key]);

    /// Stops loading content for `keys`.
    fn cancel_prefetching(&mut self, keys: &[Self::Key]);
}

/// Turns the host's prefetch hints into calls on a [`ContentPrefetcher`].
///
/// Rows whose generator yields no
/// [`prefetch_key`](crate::CellGenerator::prefetch_key) are skipped, and the
/// prefetcher is not called at all when no key remains.
#[derive(Debug)]
pub struct PrefetchPlugin<P> {
    prefetcher: P,
}

impl<P> PrefetchPlugin<P> {
    /// Wraps `prefetcher`.
    #[must_use]
    pub fn new(prefetcher: P) -> Self {
        Self { prefetcher }
    }

    /// The wrapped prefetcher.
    #[must_use]
    pub fn prefetcher(&self) -> &P {
        &self.prefetcher
    }
}

fn keys_for<H: ListHost>(store: &SectionStore<H>, rows: &IndexPathBatch) -> Vec<H::ContentKey> {
    rows.iter()
        .filter_map(|position| store.generator_at(*position))
        .filter_map(|generator| generator.prefetch_key())
        .collect()
}

impl<H, P> ListPlugin<H> for PrefetchPlugin<P>
where
    H: ListHost,
    P: ContentPrefetcher<Key = H::ContentKey>,
{
    type Event = PrefetchEvent;

    fn process(&mut self, event: &PrefetchEvent, store: &mut SectionStore<H>) {
        match event {
            PrefetchEvent::Prefetch(rows) => {
                let keys = keys_for(store, rows);
                if !keys.is_empty() {
                    log::trace!("prefetching {} of {} rows", keys.len(), rows.len());
                    self.prefetcher.start_prefetching(&keys);
                }
            }
            PrefetchEvent::CancelPrefetching(rows) => {
                let keys = keys_for(store, rows);
                if !keys.is_empty() {
                    log::trace!("cancelling prefetch for {} rows", keys.len());
                    self.prefetcher.cancel_prefetching(&keys);
                }
            }
        }
    }
}
