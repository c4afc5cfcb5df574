// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context-wide configuration.

/// Default width of the window in which a mousedown counts as the widget's own
/// opening click rather than an outside click.
pub const DEFAULT_MENU_EVENT_WINDOW_MS: u64 = 100;

/// Tunables shared by every widget rendered against one
/// [`MenuContext`](crate::context::MenuContext).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// How long after an opening mousedown a window-level mousedown is still
    /// attributed to that opening click.
    ///
    /// The widget's own label handler and the window listener react to the same
    /// physical click, so this only needs to cover one dispatch. Input stacks
    /// that synthesize mousedown late (some touch and pen drivers) may need more.
    pub menu_event_window_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu_event_window_ms: DEFAULT_MENU_EVENT_WINDOW_MS,
        }
    }
}

impl MenuConfig {
    /// Set [`MenuConfig::menu_event_window_ms`].
    #[must_use]
    pub fn with_menu_event_window_ms(mut self, ms: u64) -> Self {
        self.menu_event_window_ms = ms;
        self
    }
}
