// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering lists of widgets and combining their updates.
//!
//! [`render_grouped_items`] renders each child once and wraps it in a container
//! element; [`combine_updates`] folds the children's update functions into one
//! that hides the containers of invisible children and reports whether any
//! child is visible. Dropdowns and submenus build their panels from these,
//! and [`Group`] exposes them as a standalone vertical stack.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use understory_menu_tree::{Element, ElementId};

use crate::classes;
use crate::context::MenuContext;
use crate::display::{MenuContent, MenuElement, Rendered, UpdateFn};
use crate::error::InvalidSpecError;
use crate::view::EditorView;

/// Children rendered into wrapper elements, with a combined update.
pub struct RenderedGroup<S> {
    /// One wrapper element per child, in order. Detached; the caller attaches them.
    pub nodes: Vec<ElementId>,
    /// Combined update; see [`combine_updates`].
    pub update: UpdateFn<S>,
}

impl<S> core::fmt::Debug for RenderedGroup<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderedGroup")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

/// Render `items` in order, wrapping each in an element with `wrapper_class`.
///
/// If any child fails, everything created so far is removed again, including
/// the panels owned by dropdown children, and the error is returned.
pub fn render_grouped_items<V: EditorView>(
    items: &[MenuContent<V>],
    cx: &MenuContext,
    view: &Rc<V>,
    wrapper_class: &str,
) -> Result<RenderedGroup<V::State>, InvalidSpecError> {
    let mut nodes = Vec::with_capacity(items.len());
    let mut updates = Vec::with_capacity(items.len());
    for item in items {
        let rendered = match item.render(cx, view) {
            Ok(rendered) => rendered,
            Err(err) => {
                for node in nodes {
                    cx.remove_element(node);
                }
                return Err(err);
            }
        };
        let wrapper = cx.with_tree_mut(|tree| {
            let wrapper = tree.insert(None, Element::with_class(wrapper_class));
            tree.append_child(wrapper, rendered.node);
            wrapper
        });
        nodes.push(wrapper);
        updates.push(rendered.update);
    }
    let update = combine_updates(cx.clone(), updates, nodes.clone());
    Ok(RenderedGroup { nodes, update })
}

/// Fold child updates into one.
///
/// Every child update runs, in order, on each call. Each entry of `nodes` is
/// hidden when its update returns false and shown otherwise. The result is
/// true if at least one child is visible.
pub fn combine_updates<S: 'static>(
    cx: MenuContext,
    mut updates: Vec<UpdateFn<S>>,
    nodes: Vec<ElementId>,
) -> UpdateFn<S> {
    debug_assert_eq!(updates.len(), nodes.len(), "one node per update");
    Box::new(move |state: &S| {
        let mut something = false;
        for (update, &node) in updates.iter_mut().zip(&nodes) {
            let visible = update(state);
            cx.with_tree_mut(|tree| tree.set_hidden(node, !visible));
            something |= visible;
        }
        something
    })
}

/// A vertical stack of widgets.
///
/// Renders a [`GROUP`](classes::GROUP) container with one
/// [`MENUITEM`](classes::MENUITEM) wrapper per child. The container hides
/// itself when no child is visible.
pub struct Group<V: EditorView> {
    content: Vec<MenuContent<V>>,
}

impl<V: EditorView> core::fmt::Debug for Group<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Group")
            .field("len", &self.content.len())
            .finish()
    }
}

impl<V: EditorView> Group<V> {
    /// Group the given widgets.
    pub fn new(content: impl IntoIterator<Item = MenuContent<V>>) -> Self {
        Self {
            content: content.into_iter().collect(),
        }
    }
}

impl<V: EditorView> MenuElement<V> for Group<V> {
    fn render(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<Rendered<V::State>, InvalidSpecError> {
        let RenderedGroup { nodes, mut update } =
            render_grouped_items(&self.content, cx, view, classes::MENUITEM)?;
        let container = cx.with_tree_mut(|tree| {
            let container = tree.insert(None, Element::with_class(classes::GROUP));
            for node in nodes {
                tree.append_child(container, node);
            }
            container
        });
        let cx = cx.clone();
        Ok(Rendered {
            node: container,
            update: Box::new(move |state: &V::State| {
                let visible = update(state);
                cx.with_tree_mut(|tree| tree.set_hidden(container, !visible));
                visible
            }),
        })
    }
}
