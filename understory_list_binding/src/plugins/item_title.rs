// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::host::ListHost;
use crate::store::SectionStore;
use crate::types::{Capabilities, IndexPath};

/// Builds the jump-list index from [`IndexTitled`](crate::IndexTitled) rows.
#[derive(Copy, Clone, Debug, Default)]
pub struct ItemTitlePlugin;

impl ItemTitlePlugin {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Titles of every row that wants one, in list order.
    #[must_use]
    pub fn index_titles<H: ListHost>(&self, store: &SectionStore<H>) -> Vec<String> {
        store
            .iter_with(Capabilities::INDEX_TITLED)
            .filter_map(|(_, id)| store.generator(id)?.as_index_titled())
            .filter(|titled| titled.needs_index_title())
            .map(|titled| titled.index_title().to_string())
            .collect()
    }

    /// Position of the first row carrying `title`.
    ///
    /// Rows that hide their title from the index still match.
    #[must_use]
    pub fn position_for_index_title<H: ListHost>(
        &self,
        store: &SectionStore<H>,
        title: &str,
    ) -> Option<IndexPath> {
        store
            .iter_with(Capabilities::INDEX_TITLED)
            .find(|(_, id)| {
                store
                    .generator(*id)
                    .and_then(|generator| generator.as_index_titled())
                    .is_some_and(|titled| titled.index_title() == title)
            })
            .map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::ItemTitlePlugin;
    use crate::store::SectionStore;
    use crate::test_support::{RecordingHost, TestHeader, TestRow};
    use crate::types::IndexPath;

    #[test]
    fn titles_follow_list_order_and_skip_hidden_ones() {
        let mut store = SectionStore::<RecordingHost>::new();
        store.append(Box::new(TestRow::new("apple").with_index_title("A")));
        store.append(Box::new(TestRow::new("no title")));
        store.push_header(Box::new(TestHeader::new("B", 20.0)));
        store.append(Box::new(TestRow::new("banana").with_hidden_index_title("B")));
        store.append(Box::new(TestRow::new("cherry").with_index_title("C")));

        let plugin = ItemTitlePlugin::new();
        assert_eq!(plugin.index_titles(&store), ["A", "C"]);
        assert_eq!(
            plugin.position_for_index_title(&store, "B"),
            Some(IndexPath::new(1, 0))
        );
        assert_eq!(
            plugin.position_for_index_title(&store, "C"),
            Some(IndexPath::new(1, 1))
        );
        assert_eq!(plugin.position_for_index_title(&store, "Z"), None);
    }
}
