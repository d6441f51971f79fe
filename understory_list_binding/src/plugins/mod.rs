// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made plugins.
//!
//! Event plugins ([`DisplayablePlugin`], [`FoldablePlugin`], [`PrefetchPlugin`])
//! are registered with [`ListBuilder::add_plugin`](crate::ListBuilder::add_plugin).
//! Feature plugins ([`ItemTitlePlugin`], [`SwipeActionsPlugin`]) answer host
//! queries instead of observing events and are installed with their own builder
//! methods.

mod displayable;
mod foldable;
mod item_title;
mod prefetch;
mod swipe_actions;

pub use displayable::DisplayablePlugin;
pub use foldable::FoldablePlugin;
pub use item_title::ItemTitlePlugin;
pub use prefetch::{ContentPrefetcher, PrefetchPlugin};
pub use swipe_actions::{SwipeActionsPlugin, SwipeEdge};
