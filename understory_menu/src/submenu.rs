// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested submenus inside a dropdown panel.
//!
//! The submenu panel is always attached under the wrapper. Whether it shows is
//! a styling decision driven by two signals: the pointer hovering the wrapper,
//! or the wrapper carrying [`SUBMENU_WRAP_ACTIVE`](classes::SUBMENU_WRAP_ACTIVE)
//! after a tap on the label. A tap expands the submenu and registers at most
//! one window listener; the next mousedown that is not a menu event for the
//! wrapper collapses it and releases that listener.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_menu_tree::{Element, ElementId};

use crate::classes;
use crate::context::MenuContext;
use crate::display::{MenuContent, MenuElement, Rendered};
use crate::dropdown::DropdownOptions;
use crate::error::InvalidSpecError;
use crate::group::{RenderedGroup, render_grouped_items};
use crate::listeners::ListenerGuard;
use crate::view::EditorView;

/// Submenu label options.
pub type SubmenuOptions = DropdownOptions;

type SubmenuState = Rc<RefCell<Option<ListenerGuard>>>;

/// Host-side view of one rendered submenu.
#[derive(Debug, Clone)]
pub struct SubmenuControl {
    cx: MenuContext,
    state: SubmenuState,
    wrap: ElementId,
    label: ElementId,
    panel: ElementId,
}

impl SubmenuControl {
    /// Returns true while the wrapper carries the active class.
    pub fn is_expanded(&self) -> bool {
        self.cx
            .with_tree(|tree| tree.has_class(self.wrap, classes::SUBMENU_WRAP_ACTIVE))
    }

    /// Returns true if the panel would be shown: expanded or hovered.
    pub fn is_showing(&self) -> bool {
        self.is_expanded() || self.cx.is_hovered(self.wrap)
    }

    /// Returns true while the collapse listener is registered.
    pub fn listener_registered(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// The wrapper element (the widget's root).
    pub fn wrapper(&self) -> ElementId {
        self.wrap
    }

    /// The label element.
    pub fn label(&self) -> ElementId {
        self.label
    }

    /// The nested panel.
    pub fn panel(&self) -> ElementId {
        self.panel
    }
}

/// A labelled submenu.
pub struct Submenu<V: EditorView> {
    content: Vec<MenuContent<V>>,
    options: SubmenuOptions,
}

impl<V: EditorView> core::fmt::Debug for Submenu<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Submenu")
            .field("len", &self.content.len())
            .field("options", &self.options)
            .finish()
    }
}

impl<V: EditorView> Submenu<V> {
    /// A submenu over `content`.
    pub fn new(
        content: impl IntoIterator<Item = MenuContent<V>>,
        options: SubmenuOptions,
    ) -> Self {
        Self {
            content: content.into_iter().collect(),
            options,
        }
    }

    /// Render and also return a [`SubmenuControl`] for the host.
    pub fn render_with_control(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<(Rendered<V::State>, SubmenuControl), InvalidSpecError> {
        let RenderedGroup {
            nodes,
            update: mut inner,
        } = render_grouped_items(&self.content, cx, view, classes::DROPDOWN_ITEM)?;

        let label = self
            .options
            .render_label(cx, &**view, classes::SUBMENU_LABEL);
        let (wrap, panel) = cx.with_tree_mut(|tree| {
            let wrap = tree.insert(None, Element::with_class(classes::SUBMENU_WRAP));
            tree.append_child(wrap, label);
            let panel = tree.insert(Some(wrap), Element::with_class(classes::SUBMENU));
            for node in nodes {
                tree.append_child(panel, node);
            }
            (wrap, panel)
        });

        let state: SubmenuState = Rc::new(RefCell::new(None));
        let handler_state = state.clone();
        cx.on_mouse_down(label, move |cx, e| {
            e.prevent_default();
            cx.mark_menu_event(e);
            cx.with_tree_mut(|tree| tree.add_class(wrap, classes::SUBMENU_WRAP_ACTIVE));
            if handler_state.borrow().is_some() {
                return;
            }
            log::debug!("submenu {wrap:?} expanded");
            let weak = Rc::downgrade(&handler_state);
            let guard = cx.add_window_listener(move |cx, _| {
                if cx.is_menu_event(wrap) {
                    return;
                }
                cx.with_tree_mut(|tree| tree.remove_class(wrap, classes::SUBMENU_WRAP_ACTIVE));
                log::debug!("submenu {wrap:?} collapsed");
                if let Some(state) = weak.upgrade() {
                    let guard = state.borrow_mut().take();
                    drop(guard);
                }
            });
            *handler_state.borrow_mut() = Some(guard);
        });

        let update_cx = cx.clone();
        let update = Box::new(move |state: &V::State| {
            let visible = inner(state);
            update_cx.with_tree_mut(|tree| tree.set_hidden(wrap, !visible));
            visible
        });

        let control = SubmenuControl {
            cx: cx.clone(),
            state,
            wrap,
            label,
            panel,
        };
        Ok((Rendered { node: wrap, update }, control))
    }
}

impl<V: EditorView> MenuElement<V> for Submenu<V> {
    fn render(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<Rendered<V::State>, InvalidSpecError> {
        self.render_with_control(cx, view)
            .map(|(rendered, _)| rendered)
    }
}
