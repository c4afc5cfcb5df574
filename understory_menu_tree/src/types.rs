// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: element identifiers, flags, and per-element data.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Affine, Rect};

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now
///   stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct
///   `ElementId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether an `ElementId` still refers
/// to a live element.
/// Stale ids never alias a different live element because the generation must match.
/// Mutators ignore stale ids; queries treat them as absent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling display, picking, and pointer state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is not displayed (the `display: none` of a stylesheet).
        ///
        /// A hidden element hides its whole subtree.
        const HIDDEN   = 0b0000_0001;
        /// Element participates in hit testing.
        const PICKABLE = 0b0000_0010;
        /// Pointer is over this element or one of its descendants.
        const HOVERED  = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::PICKABLE
    }
}

/// Data carried by a single element.
///
/// Geometry is optional: menus built purely from mousedown targets never need it,
/// while hosts that route raw pointer positions through
/// [`Tree::hit_test_point`](crate::Tree::hit_test_point) fill in `local_bounds`
/// and `local_transform` from their own layout pass.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Text content, if this element shows text directly.
    pub text: Option<String>,
    /// Ordered, de-duplicated class list.
    pub classes: Vec<String>,
    /// Named attributes such as `title`.
    pub attributes: BTreeMap<String, String>,
    /// Inline style text, appended to as-is.
    pub style: String,
    /// Display, picking, and hover flags.
    pub flags: ElementFlags,
    /// Local (untransformed) bounds.
    pub local_bounds: Rect,
    /// Local transform relative to the parent.
    pub local_transform: Affine,
    /// Stacking order among overlapping elements. Higher is on top.
    pub z_index: i32,
}

impl Element {
    /// An element with the given space-separated class list.
    pub fn with_class(class: &str) -> Self {
        let mut el = Self::default();
        for c in class.split_whitespace() {
            if !el.classes.iter().any(|existing| existing == c) {
                el.classes.push(c.into());
            }
        }
        el
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the inline style.
    #[must_use]
    pub fn style(mut self, css: impl Into<String>) -> Self {
        self.style = css.into();
        self
    }

    /// Set the local bounds.
    #[must_use]
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.local_bounds = bounds;
        self
    }

    /// Returns true if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_class_splits_and_dedups() {
        let el = Element::with_class("a  b a ");
        assert_eq!(el.classes, ["a", "b"]);
        assert!(el.has_class("b"));
        assert!(!el.has_class("c"));
    }

    #[test]
    fn default_flags_are_pickable_and_shown() {
        let el = Element::default();
        assert!(el.flags.contains(ElementFlags::PICKABLE));
        assert!(!el.flags.contains(ElementFlags::HIDDEN));
    }
}
