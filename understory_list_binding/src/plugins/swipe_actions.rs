// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::capability::SwipeActionsConfiguration;
use crate::host::ListHost;
use crate::store::SectionStore;
use crate::types::IndexPath;

/// Edge of a row a swipe starts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeEdge {
    /// The leading edge (left in left-to-right layouts).
    Leading,
    /// The trailing edge.
    Trailing,
}

/// Answers swipe configuration queries for [`Swipeable`](crate::Swipeable) rows.
#[derive(Copy, Clone, Debug, Default)]
pub struct SwipeActionsPlugin;

impl SwipeActionsPlugin {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Actions the row at `position` reveals from `edge`.
    #[must_use]
    pub fn configuration<'a, H: ListHost>(
        &self,
        store: &'a SectionStore<H>,
        position: IndexPath,
        edge: SwipeEdge,
    ) -> Option<&'a SwipeActionsConfiguration> {
        let swipeable = store.generator_at(position)?.as_swipeable()?;
        match edge {
            SwipeEdge::Leading => swipeable.leading_swipe_actions(),
            SwipeEdge::Trailing => swipeable.trailing_swipe_actions(),
        }
    }

    /// Performs the action at `index` of the row's `edge` configuration.
    ///
    /// Fires the row's [`did_swipe_event`](crate::Swipeable::did_swipe_event)
    /// with the action's kind and returns `true`, or returns `false` if there is
    /// no such action.
    pub fn perform<H: ListHost>(
        &self,
        store: &SectionStore<H>,
        position: IndexPath,
        edge: SwipeEdge,
        index: usize,
    ) -> bool {
        let Some(swipeable) = store
            .generator_at(position)
            .and_then(|generator| generator.as_swipeable())
        else {
            return false;
        };
        let configuration = match edge {
            SwipeEdge::Leading => swipeable.leading_swipe_actions(),
            SwipeEdge::Trailing => swipeable.trailing_swipe_actions(),
        };
        let Some(action) = configuration.and_then(|config| config.actions.get(index)) else {
            return false;
        };
        let kind = action.kind.clone();
        log::debug!("swipe action {kind:?} performed on {position:?}");
        swipeable.did_swipe_event().invoke(&kind);
        true
    }
}
