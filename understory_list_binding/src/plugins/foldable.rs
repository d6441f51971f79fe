// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::host::ListHost;
use crate::plugin::{ListPlugin, TableEvent};
use crate::store::SectionStore;

/// Toggles [`Foldable`](crate::Foldable) rows when they are selected.
///
/// Folding only flips the row's expansion flag and fires its
/// [`did_fold_event`](crate::Foldable::did_fold_event); the store is not
/// restructured, so child rows are the row's own view concern.
#[derive(Copy, Clone, Debug, Default)]
pub struct FoldablePlugin;

impl FoldablePlugin {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<H: ListHost> ListPlugin<H> for FoldablePlugin {
    type Event = TableEvent;

    fn process(&mut self, event: &TableEvent, store: &mut SectionStore<H>) {
        let TableEvent::DidSelect(position) = event else {
            return;
        };
        let Some(foldable) = store
            .generator_at_mut(*position)
            .and_then(|generator| generator.as_foldable_mut())
        else {
            return;
        };
        let expanded = foldable.toggle();
        log::debug!("row {position:?} folded, expanded: {expanded}");
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use super::FoldablePlugin;
    use crate::capability::Foldable;
    use crate::plugin::{ListPlugin, TableEvent};
    use crate::store::SectionStore;
    use crate::test_support::{RecordingHost, TestRow, record};
    use crate::types::IndexPath;

    #[test]
    fn selecting_a_folded_row_expands_it_without_touching_the_store() {
        let row = TestRow::new("parent").foldable(&["x", "y"]);
        let folds = record(row.fold.as_ref().unwrap().did_fold_event());

        let mut store = SectionStore::<RecordingHost>::new();
        let parent = store.append(Box::new(row));
        store.append(Box::new(TestRow::new("sibling")));
        let before = store.section(0).to_vec();

        let mut plugin = FoldablePlugin::new();
        plugin.process(&TableEvent::DidSelect(IndexPath::new(0, 0)), &mut store);
        plugin.process(&TableEvent::DidSelect(IndexPath::new(0, 1)), &mut store);

        assert_eq!(*folds.borrow(), vec![true]);
        assert_eq!(store.section(0), before.as_slice());
        let fold = store.generator(parent).unwrap().as_foldable().unwrap();
        assert!(fold.is_expanded());
        assert_eq!(fold.child_count(), 2);
    }
}
