// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render/update contract shared by every widget.
//!
//! ## Contract
//!
//! [`MenuElement::render`] is called once per widget. It creates the widget's
//! elements in the context's tree and returns a [`Rendered`]: the root element
//! (for the host to attach) and an update function. The host then calls the
//! update function with every new editor state. Update returns whether the
//! widget is visible for that state, so a parent can hide itself when none of
//! its children are.
//!
//! Updates of sibling widgets are independent and may run in any order, but
//! every top-level widget should see the same state before the next one is
//! dispatched.

use alloc::boxed::Box;
use alloc::rc::Rc;

use understory_menu_tree::ElementId;

use crate::context::MenuContext;
use crate::error::InvalidSpecError;
use crate::view::EditorView;

/// Recomputes a widget's styling for a state; returns its visibility.
pub type UpdateFn<S> = Box<dyn FnMut(&S) -> bool>;

/// A rendered widget.
pub struct Rendered<S> {
    /// Root element of the widget.
    pub node: ElementId,
    /// Styling update for new editor states.
    pub update: UpdateFn<S>,
}

impl<S> Rendered<S> {
    /// Run the update function.
    pub fn update(&mut self, state: &S) -> bool {
        (self.update)(state)
    }
}

impl<S> core::fmt::Debug for Rendered<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rendered")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// Anything that can be rendered into a menu: items, dropdowns, submenus, groups.
pub trait MenuElement<V: EditorView> {
    /// Create this widget's elements and return its root and update function.
    fn render(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<Rendered<V::State>, InvalidSpecError>;
}

/// Shared, type-erased menu content.
pub type MenuContent<V> = Rc<dyn MenuElement<V>>;

/// Erase a widget into [`MenuContent`].
pub fn content<V: EditorView>(element: impl MenuElement<V> + 'static) -> MenuContent<V> {
    Rc::new(element)
}
