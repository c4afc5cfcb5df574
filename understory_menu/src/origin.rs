// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction-origin record.
//!
//! An opening mousedown on a widget label and the window-level listener that
//! closes widgets on outside clicks both react to the same physical click. The
//! label handler runs first and stamps the [`InteractionOrigin`]; the listener
//! then asks [`InteractionOrigin::is_menu_event`] whether the click it is looking
//! at was that opening click (recent, and inside its own widget) before closing.
//!
//! One record is shared by every widget of a [`MenuContext`](crate::context::MenuContext),
//! so opening widget B while A is open lets A's listener see B's opening click
//! as an outside click.

use understory_menu_tree::{ElementId, Tree};

/// The most recent widget-internal mousedown: when, and on which element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionOrigin {
    /// Clock reading at the mousedown.
    pub time_ms: u64,
    /// Event target of the mousedown.
    pub node: Option<ElementId>,
}

impl InteractionOrigin {
    /// Returns true if this origin is younger than `window_ms` at `now_ms` and
    /// its node is `wrapper` or a descendant of it.
    pub fn is_menu_event(
        &self,
        tree: &Tree,
        wrapper: ElementId,
        now_ms: u64,
        window_ms: u64,
    ) -> bool {
        now_ms.saturating_sub(self.time_ms) < window_ms
            && self.node.is_some_and(|node| tree.contains(wrapper, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_menu_tree::Element;

    fn scene() -> (Tree, ElementId, ElementId, ElementId) {
        let mut tree = Tree::new();
        let bar = tree.insert(None, Element::default());
        let wrap = tree.insert(Some(bar), Element::default());
        let label = tree.insert(Some(wrap), Element::default());
        (tree, bar, wrap, label)
    }

    #[test]
    fn fresh_inside_origin_is_menu_event() {
        let (tree, _, wrap, label) = scene();
        let origin = InteractionOrigin {
            time_ms: 1_000,
            node: Some(label),
        };
        assert!(origin.is_menu_event(&tree, wrap, 1_000, 100));
        assert!(origin.is_menu_event(&tree, wrap, 1_099, 100));
    }

    #[test]
    fn stale_origin_is_not_menu_event() {
        let (tree, _, wrap, label) = scene();
        let origin = InteractionOrigin {
            time_ms: 1_000,
            node: Some(label),
        };
        assert!(!origin.is_menu_event(&tree, wrap, 1_100, 100));
        assert!(!origin.is_menu_event(&tree, wrap, 5_000, 100));
    }

    #[test]
    fn origin_outside_wrapper_is_not_menu_event() {
        let (tree, bar, wrap, _) = scene();
        let origin = InteractionOrigin {
            time_ms: 1_000,
            node: Some(bar),
        };
        assert!(!origin.is_menu_event(&tree, wrap, 1_000, 100));
    }

    #[test]
    fn empty_origin_is_never_menu_event() {
        let (tree, _, wrap, _) = scene();
        let origin = InteractionOrigin::default();
        assert!(!origin.is_menu_event(&tree, wrap, 0, 100));
    }
}
