// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core event types: phases, dispatch steps, and the mousedown event itself.
//!
//! These types describe how a mousedown travels through a menu.
//! They are produced by [`dispatch`](crate::dispatch) and consumed by
//! [`MenuContext::mouse_down`](crate::context::MenuContext::mouse_down).

use kurbo::Point;
use understory_menu_tree::ElementId;

/// Phases of mousedown propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// The element the pointer went down on.
    Target,
    /// Ancestors of the target, inner to outer.
    Bubble,
    /// Window-level listeners, after the event left the tree.
    Window,
}

/// A single step of a propagation sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DispatchStep {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Element whose handlers run at this step; `None` for the window phase.
    pub node: Option<ElementId>,
}

/// A mousedown as seen by element handlers and window listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEvent {
    /// Element the pointer went down on, if it landed on the menu tree at all.
    pub target: Option<ElementId>,
    /// Pointer position, when the host routed a raw point.
    pub position: Option<Point>,
    default_prevented: bool,
}

impl MenuEvent {
    /// A mousedown on `target`.
    pub fn new(target: Option<ElementId>) -> Self {
        Self {
            target,
            position: None,
            default_prevented: false,
        }
    }

    /// Attach the pointer position.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Suppress the host's default action (focus change, text selection).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns true once any handler called [`MenuEvent::prevent_default`].
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prevent_default_sticks() {
        let mut e = MenuEvent::new(None).at(Point::new(1.0, 2.0));
        assert!(!e.default_prevented());
        e.prevent_default();
        e.prevent_default();
        assert!(e.default_prevented());
        assert_eq!(e.position, Some(Point::new(1.0, 2.0)));
    }
}
