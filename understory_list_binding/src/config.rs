// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manager-wide defaults.

/// Smallest header height reported to the host.
///
/// Hosts commonly treat a zero header height as "use the toolkit default", which
/// shows an unwanted gap; a tiny positive height collapses the header instead.
pub const MIN_HEADER_HEIGHT: f64 = 0.01;

/// Defaults used when a generator does not report a size of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManagerConfig {
    /// Row height used when a generator is neither sizable nor reports a height.
    pub row_height: f64,
    /// Estimated row height used when a generator gives no estimate.
    pub estimated_row_height: f64,
    /// Floor applied to every header height, including out-of-range sections.
    pub min_header_height: f64,
    /// Report one section even when no header exists yet.
    pub always_one_section: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            row_height: 44.0,
            estimated_row_height: 40.0,
            min_header_height: MIN_HEADER_HEIGHT,
            always_one_section: false,
        }
    }
}

impl ManagerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback row height. Negative values clamp to zero.
    #[must_use]
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height.max(0.0);
        self
    }

    /// Sets the fallback estimated row height. Negative values clamp to zero.
    #[must_use]
    pub fn with_estimated_row_height(mut self, height: f64) -> Self {
        self.estimated_row_height = height.max(0.0);
        self
    }

    /// Sets the header height floor.
    ///
    /// The floor itself never drops below [`MIN_HEADER_HEIGHT`].
    #[must_use]
    pub fn with_min_header_height(mut self, height: f64) -> Self {
        self.min_header_height = height.max(MIN_HEADER_HEIGHT);
        self
    }

    /// Report a single (empty) section while the list has no headers.
    #[must_use]
    pub fn with_always_one_section(mut self, enabled: bool) -> Self {
        self.always_one_section = enabled;
        self
    }
}
