// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// A menu item spec that cannot be turned into an element.
///
/// This is a programming error in the menu definition, surfaced as soon as the
/// item is built or rendered. There is nothing to retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSpecError {
    /// The spec has no render function, no icon, and no non-empty label.
    #[error("item has no visual representation")]
    NoVisual,
    /// The spec's render function returned no element.
    #[error("item has no visual representation: renderer produced no element")]
    EmptyRender,
}
