// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional behaviors a generator can opt into.
//!
//! A generator advertises a capability by returning `Some(self)` (or a field
//! implementing the trait) from the matching accessor on
//! [`CellGenerator`](crate::CellGenerator). Callbacks and plugins that find no
//! capability on a generator do nothing.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::event::Event;

/// A row that reacts to being tapped or clicked.
pub trait Selectable {
    /// Fired when the row is selected.
    fn did_select_event(&self) -> &Event<()>;

    /// Whether the host should clear the selection highlight right after the tap.
    fn needs_deselect(&self) -> bool {
        true
    }
}

/// A row the user may drag to a different position.
pub trait Movable {
    /// Whether the row may be dragged at all.
    fn can_move(&self) -> bool {
        true
    }

    /// Whether the row may be dropped into a section other than its own.
    fn can_move_in_other_section(&self) -> bool {
        false
    }
}

/// A row that owns nested child rows and an expanded/collapsed flag.
///
/// Folding is a view-level state change: toggling fires
/// [`Foldable::did_fold_event`] for the row's own view and never inserts or
/// removes rows in the store.
pub trait Foldable {
    /// Current expansion state.
    fn is_expanded(&self) -> bool;

    /// Stores a new expansion state without notifying anyone.
    fn set_expanded(&mut self, expanded: bool);

    /// Fired with the new expansion state after every toggle.
    fn did_fold_event(&self) -> &Event<bool>;

    /// Number of nested child rows.
    fn child_count(&self) -> usize;

    /// Flips the expansion state, notifies listeners once, and returns the new state.
    fn toggle(&mut self) -> bool {
        let expanded = !self.is_expanded();
        self.set_expanded(expanded);
        self.did_fold_event().invoke(&expanded);
        expanded
    }
}

/// Ready-made [`Foldable`] state for generators to embed.
#[derive(Debug, Default)]
pub struct FoldState<C> {
    /// Whether the children are currently shown.
    pub expanded: bool,
    /// Nested child rows, in display order.
    pub children: Vec<C>,
    did_fold: Event<bool>,
}

impl<C> FoldState<C> {
    /// Creates collapsed fold state over `children`.
    #[must_use]
    pub fn new(children: Vec<C>) -> Self {
        Self {
            expanded: false,
            children,
            did_fold: Event::new(),
        }
    }
}

impl<C> Foldable for FoldState<C> {
    fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn did_fold_event(&self) -> &Event<bool> {
        &self.did_fold
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A row that computes its own size from the space available to it.
pub trait Sizable {
    /// Size of the row given the host's available space.
    fn size(&self, available: Size) -> Size;
}

/// A row that contributes a short label to the jump-list index.
pub trait IndexTitled {
    /// The label.
    fn index_title(&self) -> &str;

    /// Whether the label should appear in the index.
    fn needs_index_title(&self) -> bool {
        true
    }
}

/// A row or header that wants to know when it enters or leaves the screen.
pub trait Displayable {
    /// Fired right before the view becomes visible.
    fn will_display_event(&self) -> &Event<()>;

    /// Fired once the view is no longer visible.
    fn did_end_display_event(&self) -> &Event<()>;
}

/// Ready-made [`Displayable`] events for generators to embed.
#[derive(Debug, Default)]
pub struct DisplayEvents {
    will_display: Event<()>,
    did_end_display: Event<()>,
}

impl DisplayEvents {
    /// Creates both events with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Displayable for DisplayEvents {
    fn will_display_event(&self) -> &Event<()> {
        &self.will_display
    }

    fn did_end_display_event(&self) -> &Event<()> {
        &self.did_end_display
    }
}

/// Visual weight of a swipe action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeActionStyle {
    /// A regular action.
    #[default]
    Normal,
    /// An action that deletes or otherwise destroys data.
    Destructive,
}

/// One button revealed by swiping a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwipeAction {
    /// Optional label shown on the button.
    pub title: Option<String>,
    /// Identifier delivered through [`Swipeable::did_swipe_event`] when performed.
    pub kind: String,
    /// Visual weight.
    pub style: SwipeActionStyle,
}

impl SwipeAction {
    /// Creates an untitled action of the given kind and style.
    #[must_use]
    pub fn new(kind: impl Into<String>, style: SwipeActionStyle) -> Self {
        Self {
            title: None,
            kind: kind.into(),
            style,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The set of actions revealed on one edge of a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwipeActionsConfiguration {
    /// Actions, nearest the row edge first.
    pub actions: Vec<SwipeAction>,
    /// Whether a full swipe performs the first action.
    pub performs_first_action_with_full_swipe: bool,
}

impl SwipeActionsConfiguration {
    /// Creates a configuration where a full swipe performs the first action.
    #[must_use]
    pub fn new(actions: Vec<SwipeAction>) -> Self {
        Self {
            actions,
            performs_first_action_with_full_swipe: true,
        }
    }
}

/// A row that offers swipe actions.
pub trait Swipeable {
    /// Actions revealed by swiping from the leading edge.
    fn leading_swipe_actions(&self) -> Option<&SwipeActionsConfiguration> {
        None
    }

    /// Actions revealed by swiping from the trailing edge.
    fn trailing_swipe_actions(&self) -> Option<&SwipeActionsConfiguration> {
        None
    }

    /// Fired with the [`SwipeAction::kind`] of a performed action.
    fn did_swipe_event(&self) -> &Event<String>;
}
