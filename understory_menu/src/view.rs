// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor as seen by menu widgets.

use alloc::string::String;

/// Host editor view handed to [`MenuElement::render`](crate::display::MenuElement::render).
///
/// The menu layer never looks inside `State` or `Transaction`; it only passes
/// them between the editor and the item predicates and run handlers.
pub trait EditorView: 'static {
    /// Editor state snapshot. Typically a cheap handle (for example an `Rc`).
    type State: 'static;
    /// A change produced by a run handler.
    type Transaction: 'static;

    /// The current state.
    fn state(&self) -> Self::State;

    /// Apply a transaction.
    fn dispatch(&self, tr: Self::Transaction);

    /// Localize a user-visible label or tooltip. Identity by default.
    fn translate(&self, text: &str) -> String {
        text.into()
    }
}
