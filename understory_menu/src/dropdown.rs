// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menus: a label that opens a panel of items.
//!
//! ## States
//!
//! A dropdown starts closed. A mousedown on its label opens it: the panel is
//! attached under the wrapper and a window listener is registered. While open,
//! the dropdown owns exactly one [`OverlayHandle`].
//!
//! It closes when:
//! - the label is pressed again,
//! - a mousedown reaches the window that is not a menu event for this dropdown
//!   (see [`MenuContext::is_menu_event`]),
//! - the host calls [`DropdownControl::close`],
//! - or the overlay handle is dropped.
//!
//! Closing detaches the panel and releases the listener together, once.
//!
//! The panel belongs to the dropdown. Once the label's handler and every
//! [`DropdownControl`] are gone, for example after the host removes the
//! wrapper with [`MenuContext::remove_element`], the panel and its items are
//! removed too, open or not.
//!
//! ## Example
//!
//! ```
//! # use std::rc::Rc;
//! # use understory_menu::clock::ManualClock;
//! # use understory_menu::config::MenuConfig;
//! # use understory_menu::context::MenuContext;
//! # use understory_menu::display::content;
//! # use understory_menu::dropdown::{Dropdown, DropdownOptions};
//! # use understory_menu::item::{ItemSpec, MenuItem};
//! # use understory_menu::view::EditorView;
//! struct View;
//! impl EditorView for View {
//!     type State = ();
//!     type Transaction = ();
//!     fn state(&self) {}
//!     fn dispatch(&self, _: ()) {}
//! }
//!
//! let clock = ManualClock::new(0);
//! let cx = MenuContext::new(clock.clone(), MenuConfig::default());
//! let undo = MenuItem::new(ItemSpec::<View>::new(|_, _, _, _| {}).label("Undo")).unwrap();
//! let edit = Dropdown::new([content(undo)], DropdownOptions::new("Edit"));
//! let (_rendered, control) = edit.render_with_control(&cx, &Rc::new(View)).unwrap();
//!
//! cx.mouse_down(Some(control.label()));
//! assert!(control.is_open());
//!
//! clock.advance(500);
//! cx.mouse_down(None);
//! assert!(!control.is_open());
//! assert_eq!(cx.window_listener_count(), 0);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_menu_tree::{Element, ElementId};

use crate::classes;
use crate::context::{MenuContext, WeakMenuContext};
use crate::display::{MenuContent, MenuElement, Rendered};
use crate::error::InvalidSpecError;
use crate::group::{RenderedGroup, render_grouped_items};
use crate::listeners::ListenerGuard;
use crate::view::EditorView;

/// Label options shared by dropdowns and submenus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownOptions {
    /// Label text, translated at render time.
    pub label: String,
    /// Tooltip, translated at render time.
    pub title: Option<String>,
    /// Extra class names (space separated) for the label.
    pub class: Option<String>,
    /// Extra inline style for the label.
    pub css: Option<String>,
}

impl DropdownOptions {
    /// Options with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the tooltip.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set extra class names.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set extra inline style.
    #[must_use]
    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Extra class names, split.
    pub(crate) fn extra_classes(&self) -> impl Iterator<Item = &str> {
        self.class.iter().flat_map(|c| c.split_whitespace())
    }

    /// Build a detached label element with `base_class` plus these options.
    pub(crate) fn render_label<V: EditorView>(
        &self,
        cx: &MenuContext,
        view: &V,
        base_class: &str,
    ) -> ElementId {
        let text = view.translate(&self.label);
        let title = self.title.as_deref().map(|t| view.translate(t));
        cx.with_tree_mut(|tree| {
            let label = tree.insert(None, Element::with_class(base_class).text(text));
            for class in self.extra_classes() {
                tree.add_class(label, class);
            }
            if let Some(css) = &self.css {
                tree.append_style(label, css);
            }
            if let Some(title) = title {
                tree.set_attribute(label, "title", title);
            }
            label
        })
    }
}

/// An open dropdown panel.
///
/// Holds the window listener that closes the dropdown. Closing, explicitly or
/// by dropping the handle, detaches the panel and releases the listener.
#[derive(Debug)]
pub struct OverlayHandle {
    cx: WeakMenuContext,
    panel: ElementId,
    listener: Option<ListenerGuard>,
    done: bool,
}

impl OverlayHandle {
    /// Attach `panel` under `wrap`.
    fn open(cx: &MenuContext, wrap: ElementId, panel: ElementId) -> Self {
        cx.with_tree_mut(|tree| tree.append_child(wrap, panel));
        log::debug!("dropdown {wrap:?} opened");
        Self {
            cx: cx.downgrade(),
            panel,
            listener: None,
            done: false,
        }
    }

    /// The attached panel.
    pub fn node(&self) -> ElementId {
        self.panel
    }

    /// Returns true until the handle has been closed.
    pub fn is_open(&self) -> bool {
        !self.done
    }

    /// Detach the panel and release the listener.
    ///
    /// Returns `true` the first time and `false` afterwards.
    pub fn close(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        if let Some(listener) = self.listener.take() {
            listener.release();
        }
        if let Some(cx) = self.cx.upgrade() {
            cx.with_tree_mut(|tree| tree.detach(self.panel));
        }
        log::debug!("dropdown panel {:?} closed", self.panel);
        true
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Per-dropdown state. Owns the panel: dropping the state closes the overlay
/// and removes the panel subtree, whether or not it is attached.
#[derive(Debug)]
struct DropdownState {
    cx: WeakMenuContext,
    panel: ElementId,
    open: Option<OverlayHandle>,
}

impl DropdownState {
    fn new(cx: &MenuContext, panel: ElementId) -> Self {
        Self {
            cx: cx.downgrade(),
            panel,
            open: None,
        }
    }

    /// Close the open overlay, if any. Must not be called with `state` borrowed.
    fn close(state: &RefCell<Self>) -> bool {
        let handle = state.borrow_mut().open.take();
        handle.is_some_and(|mut handle| handle.close())
    }
}

impl Drop for DropdownState {
    fn drop(&mut self) {
        drop(self.open.take());
        if let Some(cx) = self.cx.upgrade() {
            cx.remove_element(self.panel);
        }
    }
}

/// Host-side view of one rendered dropdown.
#[derive(Debug, Clone)]
pub struct DropdownControl {
    state: Rc<RefCell<DropdownState>>,
    wrap: ElementId,
    label: ElementId,
    panel: ElementId,
}

impl DropdownControl {
    /// Returns true while the panel is attached.
    pub fn is_open(&self) -> bool {
        self.state.borrow().open.is_some()
    }

    /// Close the dropdown. Returns `false` if it was not open.
    pub fn close(&self) -> bool {
        DropdownState::close(&self.state)
    }

    /// The wrapper element (the widget's root).
    pub fn wrapper(&self) -> ElementId {
        self.wrap
    }

    /// The label element.
    pub fn label(&self) -> ElementId {
        self.label
    }

    /// The panel element, attached only while open.
    pub fn panel(&self) -> ElementId {
        self.panel
    }
}

/// A labelled dropdown menu.
pub struct Dropdown<V: EditorView> {
    content: Vec<MenuContent<V>>,
    options: DropdownOptions,
}

impl<V: EditorView> core::fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dropdown")
            .field("len", &self.content.len())
            .field("options", &self.options)
            .finish()
    }
}

impl<V: EditorView> Dropdown<V> {
    /// A dropdown over `content`.
    pub fn new(
        content: impl IntoIterator<Item = MenuContent<V>>,
        options: DropdownOptions,
    ) -> Self {
        Self {
            content: content.into_iter().collect(),
            options,
        }
    }

    /// The label options.
    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    /// Render and also return a [`DropdownControl`] for the host.
    pub fn render_with_control(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<(Rendered<V::State>, DropdownControl), InvalidSpecError> {
        let RenderedGroup {
            nodes,
            update: mut inner,
        } = render_grouped_items(&self.content, cx, view, classes::DROPDOWN_ITEM)?;

        let panel = cx.with_tree_mut(|tree| {
            let panel = tree.insert(None, Element::with_class(classes::DROPDOWN_MENU));
            for class in self.options.extra_classes() {
                tree.add_class(panel, class);
            }
            for node in nodes {
                tree.append_child(panel, node);
            }
            panel
        });
        let label = self.options.render_label(cx, &**view, classes::DROPDOWN);
        let wrap = cx.with_tree_mut(|tree| {
            let wrap = tree.insert(None, Element::with_class(classes::DROPDOWN_WRAP));
            tree.append_child(wrap, label);
            wrap
        });

        let state = Rc::new(RefCell::new(DropdownState::new(cx, panel)));
        let handler_state = state.clone();
        cx.on_mouse_down(label, move |cx, e| {
            e.prevent_default();
            cx.mark_menu_event(e);
            if DropdownState::close(&handler_state) {
                return;
            }
            let handle = expand(cx, &handler_state, wrap, panel);
            handler_state.borrow_mut().open = Some(handle);
        });

        let update_cx = cx.clone();
        let update = Box::new(move |state: &V::State| {
            let visible = inner(state);
            update_cx.with_tree_mut(|tree| tree.set_hidden(wrap, !visible));
            visible
        });

        let control = DropdownControl {
            state,
            wrap,
            label,
            panel,
        };
        Ok((Rendered { node: wrap, update }, control))
    }
}

/// Open the panel and listen for the mousedown that closes it.
fn expand(
    cx: &MenuContext,
    state: &Rc<RefCell<DropdownState>>,
    wrap: ElementId,
    panel: ElementId,
) -> OverlayHandle {
    let mut handle = OverlayHandle::open(cx, wrap, panel);
    let weak = Rc::downgrade(state);
    handle.listener = Some(cx.add_window_listener(move |cx, _| {
        if cx.is_menu_event(wrap) {
            return;
        }
        if let Some(state) = weak.upgrade() {
            DropdownState::close(&state);
        }
    }));
    handle
}

impl<V: EditorView> MenuElement<V> for Dropdown<V> {
    fn render(
        &self,
        cx: &MenuContext,
        view: &Rc<V>,
    ) -> Result<Rendered<V::State>, InvalidSpecError> {
        self.render_with_control(cx, view)
            .map(|(rendered, _)| rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::content;
    use crate::item::{ItemSpec, MenuItem};
    use crate::submenu::{Submenu, SubmenuOptions};
    use crate::test_util::{TestState, TestView, find_text, fixture, label_item};
    use alloc::vec;
    use kurbo::{Point, Rect};

    fn edit_menu() -> Dropdown<TestView> {
        Dropdown::new(
            [label_item("Undo", "undo"), label_item("Redo", "redo")],
            DropdownOptions::new("Edit")
                .title("Edit menu")
                .class("wide")
                .css("color: red"),
        )
    }

    fn attached(cx: &MenuContext, control: &DropdownControl) -> bool {
        cx.with_tree(|tree| tree.parent(control.panel()) == Some(control.wrapper()))
    }

    #[test]
    fn render_builds_label_wrapper_and_detached_panel() {
        let (cx, _, view) = fixture();
        view.shout.set(true);
        let (r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        assert_eq!(r.node, control.wrapper());
        cx.with_tree(|tree| {
            let label = control.label();
            assert!(tree.has_class(r.node, classes::DROPDOWN_WRAP));
            assert!(tree.has_class(label, classes::DROPDOWN));
            assert!(tree.has_class(label, "wide"));
            assert_eq!(tree.text(label), Some("EDIT"));
            assert_eq!(tree.attribute(label, "title"), Some("EDIT MENU"));
            assert_eq!(tree.get(label).unwrap().style, "color: red");
            assert_eq!(tree.children(r.node), [label]);

            let panel = control.panel();
            assert_eq!(tree.parent(panel), None);
            assert!(tree.has_class(panel, classes::DROPDOWN_MENU));
            assert!(tree.has_class(panel, "wide"));
            assert_eq!(tree.children(panel).len(), 2);
        });
        assert!(find_text(&cx, control.panel(), "UNDO").is_some());
        assert_eq!(cx.window_listener_count(), 0);
    }

    #[test]
    fn opening_click_keeps_dropdown_open() {
        let (cx, _, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        let e = cx.mouse_down(Some(control.label()));
        assert!(e.default_prevented());
        assert!(control.is_open());
        assert!(attached(&cx, &control));
        assert_eq!(cx.window_listener_count(), 1);
    }

    #[test]
    fn outside_click_closes_exactly_once() {
        let (cx, clock, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        let outside = cx.create_element(None, Element::default());

        cx.mouse_down(Some(control.label()));
        clock.advance(200);
        cx.mouse_down(Some(outside));
        assert!(!control.is_open());
        assert!(!attached(&cx, &control));
        assert_eq!(cx.window_listener_count(), 0);

        assert!(!control.close(), "second close is a no-op");
        cx.mouse_down(None);
        assert_eq!(cx.window_listener_count(), 0);
    }

    #[test]
    fn click_right_after_opening_counts_as_menu_event() {
        let (cx, clock, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        cx.mouse_down(Some(control.label()));
        clock.advance(10);
        cx.mouse_down(None);
        assert!(control.is_open());

        clock.advance(90);
        cx.mouse_down(None);
        assert!(!control.is_open());
    }

    #[test]
    fn label_click_while_open_toggles_closed() {
        let (cx, clock, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        cx.mouse_down(Some(control.label()));
        clock.advance(500);
        cx.mouse_down(Some(control.label()));
        assert!(!control.is_open());
        assert_eq!(cx.window_listener_count(), 0);

        cx.mouse_down(Some(control.label()));
        assert!(control.is_open());
    }

    #[test]
    fn item_click_inside_panel_closes_after_window() {
        let (cx, clock, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        let undo = find_text(&cx, control.panel(), "Undo").unwrap();

        cx.mouse_down(Some(control.label()));
        clock.advance(50);
        cx.mouse_down(Some(undo));
        assert!(control.is_open(), "origin inside the wrapper is still fresh");

        clock.advance(100);
        cx.mouse_down(Some(undo));
        assert!(!control.is_open());
        assert_eq!(*view.dispatched.borrow(), vec!["undo", "undo"]);
    }

    #[test]
    fn opening_another_dropdown_closes_the_first() {
        let (cx, clock, view) = fixture();
        let (_a, first) = edit_menu().render_with_control(&cx, &view).unwrap();
        let (_b, second) = edit_menu().render_with_control(&cx, &view).unwrap();

        cx.mouse_down(Some(first.label()));
        clock.advance(1_000);
        cx.mouse_down(Some(second.label()));
        assert!(!first.is_open());
        assert!(second.is_open());
        assert_eq!(cx.window_listener_count(), 1);
    }

    #[test]
    fn nested_dropdown_opens_inside_open_parent() {
        let (cx, clock, view) = fixture();
        let inner = Dropdown::new([label_item("Table", "table")], DropdownOptions::new("Insert"));
        let outer = Dropdown::new([content(inner)], DropdownOptions::new("Edit"));
        let (_r, control) = outer.render_with_control(&cx, &view).unwrap();
        let inner_label = find_text(&cx, control.panel(), "Insert").unwrap();

        cx.mouse_down(Some(control.label()));
        clock.advance(1_000);
        cx.mouse_down(Some(inner_label));
        assert!(control.is_open());
        assert_eq!(cx.window_listener_count(), 2);
        let table = find_text(&cx, control.panel(), "Table").unwrap();
        cx.with_tree(|tree| assert!(tree.contains(control.panel(), table)));
    }

    #[test]
    fn submenu_clicks_keep_dropdown_open() {
        let (cx, clock, view) = fixture();
        let more = Submenu::new([label_item("Cut", "cut")], SubmenuOptions::new("More"));
        let menu = Dropdown::new([content(more)], DropdownOptions::new("Edit"));
        let (_r, control) = menu.render_with_control(&cx, &view).unwrap();
        let more_label = find_text(&cx, control.panel(), "More").unwrap();

        cx.mouse_down(Some(control.label()));
        clock.advance(1_000);
        cx.mouse_down(Some(more_label));
        assert!(control.is_open());
        assert_eq!(cx.window_listener_count(), 2);

        clock.advance(1_000);
        cx.mouse_down(None);
        assert!(!control.is_open());
        assert_eq!(cx.window_listener_count(), 0);
    }

    #[test]
    fn dropping_widget_state_releases_listener() {
        let (cx, _, view) = fixture();
        let (r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        cx.mouse_down(Some(control.label()));
        assert_eq!(cx.window_listener_count(), 1);

        drop(control);
        cx.remove_element(r.node);
        assert_eq!(cx.window_listener_count(), 0);
        assert!(cx.with_tree(|tree| tree.is_empty()));
    }

    #[test]
    fn removing_closed_dropdown_frees_panel() {
        let (cx, _, view) = fixture();
        let r = edit_menu().render(&cx, &view).unwrap();
        assert!(Rc::strong_count(&view) > 1);

        cx.remove_element(r.node);
        assert!(cx.with_tree(|tree| tree.is_empty()));
        assert_eq!(Rc::strong_count(&view), 1, "item handlers were dropped");
    }

    #[test]
    fn panel_outlives_removal_while_control_is_held() {
        let (cx, _, view) = fixture();
        let (r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        cx.remove_element(r.node);
        assert!(cx.with_tree(|tree| tree.is_alive(control.panel())));

        drop(control);
        assert!(cx.with_tree(|tree| tree.is_empty()));
    }

    #[test]
    fn close_is_idempotent_on_open_dropdown() {
        let (cx, _, view) = fixture();
        let (_r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        cx.mouse_down(Some(control.label()));
        assert!(attached(&cx, &control));

        assert!(control.close());
        assert!(!control.is_open());
        assert!(!attached(&cx, &control));
        assert_eq!(cx.window_listener_count(), 0);

        assert!(!control.close());
        assert!(!attached(&cx, &control));
        assert!(cx.with_tree(|tree| tree.is_alive(control.panel())));
        assert_eq!(cx.window_listener_count(), 0);
    }

    #[test]
    fn overlay_handle_close_is_idempotent() {
        let (cx, _, _) = fixture();
        let wrap = cx.create_element(None, Element::default());
        let panel = cx.create_element(None, Element::default());
        let state = Rc::new(RefCell::new(DropdownState::new(&cx, panel)));
        let mut handle = expand(&cx, &state, wrap, panel);

        assert!(handle.close());
        assert!(!handle.is_open());
        assert_eq!(cx.window_listener_count(), 0);
        cx.with_tree(|tree| assert_eq!(tree.parent(panel), None));

        assert!(!handle.close());
        drop(handle);
        assert_eq!(cx.window_listener_count(), 0);
    }

    #[test]
    fn closed_panel_ignores_pointer_clicks() {
        let (cx, clock, view) = fixture();
        let (r, control) = edit_menu().render_with_control(&cx, &view).unwrap();
        let undo = find_text(&cx, control.panel(), "Undo").unwrap();
        let bar = cx.create_element(
            None,
            Element::default().bounds(Rect::new(0.0, 0.0, 400.0, 400.0)),
        );
        cx.with_tree_mut(|tree| {
            tree.append_child(bar, r.node);
            tree.set_local_bounds(control.label(), Rect::new(0.0, 0.0, 60.0, 20.0));
            tree.set_local_bounds(control.panel(), Rect::new(0.0, 20.0, 160.0, 80.0));
            tree.set_local_bounds(undo, Rect::new(0.0, 20.0, 160.0, 40.0));
        });

        let e = cx.pointer_down(bar, Point::new(10.0, 30.0));
        assert_eq!(e.target, Some(bar));
        assert!(view.dispatched.borrow().is_empty());

        cx.pointer_down(bar, Point::new(10.0, 10.0));
        assert!(control.is_open());
        clock.advance(500);
        let e = cx.pointer_down(bar, Point::new(10.0, 30.0));
        assert_eq!(e.target, Some(undo));
        assert_eq!(*view.dispatched.borrow(), vec!["undo"]);
        assert!(!control.is_open());
    }

    #[test]
    fn dropped_overlay_handle_closes_itself() {
        let (cx, _, _) = fixture();
        let wrap = cx.create_element(None, Element::default());
        let panel = cx.create_element(None, Element::default());
        let state = Rc::new(RefCell::new(DropdownState::new(&cx, panel)));
        let handle = expand(&cx, &state, wrap, panel);
        assert!(handle.is_open());
        assert_eq!(handle.node(), panel);
        assert_eq!(cx.window_listener_count(), 1);

        drop(handle);
        assert_eq!(cx.window_listener_count(), 0);
        cx.with_tree(|tree| assert_eq!(tree.parent(panel), None));
    }

    #[test]
    fn update_hides_wrapper_with_no_visible_items() {
        let (cx, _, view) = fixture();
        let hidden = content(
            MenuItem::new(
                ItemSpec::<TestView>::new(|_, _, _, _| {})
                    .label("Code")
                    .select(|s: &TestState| s.in_code),
            )
            .unwrap(),
        );
        let menu = Dropdown::new([hidden], DropdownOptions::new("Insert"));
        let mut r = menu.render(&cx, &view).unwrap();

        assert!(!r.update(&TestState::default()));
        cx.with_tree(|tree| assert!(tree.is_hidden(r.node)));
        assert!(r.update(&TestState {
            in_code: true,
            ..Default::default()
        }));
        cx.with_tree(|tree| assert!(!tree.is_hidden(r.node)));
    }

    #[test]
    fn invalid_child_fails_render() {
        let (cx, _, view) = fixture();
        let broken = content(
            MenuItem::new(ItemSpec::<TestView>::new(|_, _, _, _| {}).render(|_, _| None)).unwrap(),
        );
        let menu = Dropdown::new([broken], DropdownOptions::new("Broken"));
        assert_eq!(
            menu.render(&cx, &view).unwrap_err(),
            InvalidSpecError::EmptyRender
        );
        assert!(cx.with_tree(|tree| tree.is_empty()));
    }
}
