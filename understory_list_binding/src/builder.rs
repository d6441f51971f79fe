// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiring a manager, its delegate and data source, and plugins to a host.

use core::fmt;

use crate::config::ManagerConfig;
use crate::data_source::ListDataSource;
use crate::delegate::ListDelegate;
use crate::host::ListHost;
use crate::manager::ListManager;
use crate::plugin::{ListPlugin, Plugins};
use crate::plugins::{ItemTitlePlugin, SwipeActionsPlugin};

/// Collects configuration and plugins, then produces a [`ListManager`].
///
/// ```rust
/// # use understory_list_binding::{IndexPath, ListHost, RowAnimation, ScrollPosition};
/// # struct Host;
/// # impl ListHost for Host {
/// #     type Cell = ();
/// #     type Header = ();
/// #     type ContentKey = ();
/// #     fn reload_data(&mut self) {}
/// #     fn begin_updates(&mut self) {}
/// #     fn end_updates(&mut self) {}
/// #     fn insert_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn delete_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn reload_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn insert_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn delete_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn reload_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn scroll_to_row(&mut self, _: IndexPath, _: ScrollPosition, _: bool) {}
/// #     fn deselect_row(&mut self, _: IndexPath, _: bool) {}
/// # }
/// use understory_list_binding::{DisplayablePlugin, FoldablePlugin, ListManager, ManagerConfig};
///
/// let manager = ListManager::builder(Host)
///     .config(ManagerConfig::new().with_row_height(56.0))
///     .add_plugin(DisplayablePlugin::new())
///     .add_plugin(FoldablePlugin::new())
///     .item_titles()
///     .build();
///
/// assert_eq!(manager.delegate().table_plugins().len(), 2);
/// assert!(manager.delegate().item_titles().is_some());
/// ```
pub struct ListBuilder<H: ListHost> {
    host: H,
    config: ManagerConfig,
    plugins: Plugins<H>,
    item_titles: Option<ItemTitlePlugin>,
    swipe_actions: Option<SwipeActionsPlugin>,
}

impl<H: ListHost + fmt::Debug> fmt::Debug for ListBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBuilder")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("plugins", &self.plugins)
            .field("item_titles", &self.item_titles)
            .field("swipe_actions", &self.swipe_actions)
            .finish()
    }
}

impl<H: ListHost> ListBuilder<H> {
    /// Starts a builder for `host` with the default configuration.
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: ManagerConfig::default(),
            plugins: Plugins::default(),
            item_titles: None,
            swipe_actions: None,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds an event plugin on the channel its event type names.
    ///
    /// Plugins on a channel run in the order they were added.
    #[must_use]
    pub fn add_plugin<P>(mut self, plugin: P) -> Self
    where
        P: ListPlugin<H> + 'static,
    {
        self.plugins.add(plugin);
        self
    }

    /// Installs the jump-list plugin.
    #[must_use]
    pub fn item_titles(mut self) -> Self {
        self.item_titles = Some(ItemTitlePlugin::new());
        self
    }

    /// Installs the swipe actions plugin.
    #[must_use]
    pub fn swipe_actions(mut self) -> Self {
        self.swipe_actions = Some(SwipeActionsPlugin::new());
        self
    }

    /// Wires everything together.
    pub fn build(self) -> ListManager<H> {
        let Plugins {
            table,
            scroll,
            prefetch,
        } = self.plugins;
        log::debug!(
            "building list manager: {} table, {} scroll, {} prefetch plugins",
            table.len(),
            scroll.len(),
            prefetch.len()
        );
        let delegate = ListDelegate::new(table, scroll, self.item_titles, self.swipe_actions);
        let data_source = ListDataSource::new(prefetch);
        ListManager::from_parts(self.host, self.config, delegate, data_source)
    }
}
