// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by lookup-based list mutations.

use crate::types::{GeneratorId, HeaderId, IndexPath};

/// Errors that can occur when mutating a list by handle or position.
///
/// None of these are fatal: callers decide whether a missing generator is a bug
/// (assert on it) or a benign race with an earlier removal (ignore it).
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The generator was never added or has already been removed.
    #[error("generator {0:?} is not in the list")]
    GeneratorNotFound(GeneratorId),

    /// The header was never added or has already been removed.
    #[error("header {0:?} is not in the list")]
    HeaderNotFound(HeaderId),

    /// The row position lies outside the current sections.
    #[error("position {0:?} is out of range")]
    OutOfRange(IndexPath),

    /// The section index lies outside the current sections.
    #[error("section {0} is out of range")]
    SectionOutOfRange(usize),
}
