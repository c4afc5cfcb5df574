// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu context: element tree, handlers, listeners, and the interaction origin.
//!
//! ## Overview
//!
//! Every widget is rendered against a [`MenuContext`]. The context owns the
//! state that a browser would otherwise keep globally:
//!
//! - the [`Tree`] the widgets render into,
//! - per-element mousedown handlers,
//! - window-level listeners (see [`listeners`](crate::listeners)),
//! - the shared [`InteractionOrigin`],
//! - the hover path used for `:hover`-style submenu display,
//! - the [`Clock`] and [`MenuConfig`].
//!
//! Independent contexts share nothing, so separate widget trees (and tests) are isolated.
//!
//! ## Re-entrancy
//!
//! No internal borrow is held while a handler, listener, or update runs.
//! Handlers may render widgets, register listeners, and mutate the tree through
//! the `&MenuContext` they receive.
//!
//! ## Host input
//!
//! - [`MenuContext::mouse_down`] for a target the host already resolved.
//! - [`MenuContext::pointer_down`] to hit test a point first.
//! - [`MenuContext::pointer_move`] / [`MenuContext::pointer_leave`] for hover.
//!
//! Pointer input is hit tested under the document root the host passes in.
//! Elements outside it, such as the panel of a closed dropdown, never receive
//! pointer input.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Point;
use understory_menu_tree::{Element, ElementFlags, ElementId, Tree};

use crate::clock::Clock;
use crate::config::MenuConfig;
use crate::dispatch::propagation_path;
use crate::hover::{HoverEvent, HoverState};
use crate::listeners::{ListenerGuard, ListenerId, WindowListeners};
use crate::origin::InteractionOrigin;
use crate::types::MenuEvent;

/// A mousedown handler attached to one element.
pub type ElementHandler = Rc<dyn Fn(&MenuContext, &mut MenuEvent)>;

struct Inner {
    tree: RefCell<Tree>,
    origin: Cell<InteractionOrigin>,
    listeners: RefCell<WindowListeners>,
    handlers: RefCell<BTreeMap<ElementId, Vec<ElementHandler>>>,
    hover: RefCell<HoverState<ElementId>>,
    clock: Box<dyn Clock>,
    config: MenuConfig,
}

/// Shared handle to the state behind a set of menu widgets.
///
/// Cloning is cheap and yields another handle to the same context.
#[derive(Clone)]
pub struct MenuContext {
    inner: Rc<Inner>,
}

/// Non-owning handle to a [`MenuContext`].
#[derive(Clone)]
pub struct WeakMenuContext {
    inner: Weak<Inner>,
}

impl core::fmt::Debug for MenuContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuContext")
            .field("tree", &self.inner.tree.borrow())
            .field("origin", &self.inner.origin.get())
            .field("listeners", &self.inner.listeners.borrow())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for WeakMenuContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WeakMenuContext")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl WeakMenuContext {
    /// Upgrade to a strong handle if the context is still alive.
    pub fn upgrade(&self) -> Option<MenuContext> {
        self.inner.upgrade().map(|inner| MenuContext { inner })
    }
}

impl MenuContext {
    /// Create a context with an empty tree.
    pub fn new(clock: impl Clock + 'static, config: MenuConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                tree: RefCell::new(Tree::new()),
                origin: Cell::new(InteractionOrigin::default()),
                listeners: RefCell::new(WindowListeners::default()),
                handlers: RefCell::new(BTreeMap::new()),
                hover: RefCell::new(HoverState::new()),
                clock: Box::new(clock),
                config,
            }),
        }
    }

    /// Create a context driven by the system clock.
    #[cfg(feature = "std")]
    pub fn with_system_clock(config: MenuConfig) -> Self {
        Self::new(crate::clock::SystemClock::new(), config)
    }

    /// A non-owning handle.
    pub fn downgrade(&self) -> WeakMenuContext {
        WeakMenuContext {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> MenuConfig {
        self.inner.config
    }

    /// Current clock reading.
    pub fn now_ms(&self) -> u64 {
        self.inner.clock.now_ms()
    }

    // --- tree access ---

    /// Read the element tree.
    ///
    /// Do not call back into the context from `f`.
    pub fn with_tree<R>(&self, f: impl FnOnce(&Tree) -> R) -> R {
        f(&*self.inner.tree.borrow())
    }

    /// Mutate the element tree.
    ///
    /// Do not call back into the context from `f`.
    pub fn with_tree_mut<R>(&self, f: impl FnOnce(&mut Tree) -> R) -> R {
        f(&mut *self.inner.tree.borrow_mut())
    }

    /// Insert an element.
    pub fn create_element(&self, parent: Option<ElementId>, element: Element) -> ElementId {
        self.with_tree_mut(|tree| tree.insert(parent, element))
    }

    /// Remove an element and its subtree, dropping their mousedown handlers.
    pub fn remove_element(&self, id: ElementId) {
        let removed = self.with_tree_mut(|tree| tree.remove(id));
        let dropped: Vec<_> = {
            let mut handlers = self.inner.handlers.borrow_mut();
            removed.iter().filter_map(|id| handlers.remove(id)).collect()
        };
        drop(dropped);
    }

    // --- handlers and listeners ---

    /// Attach a mousedown handler to an element.
    ///
    /// Handlers on the same element run in attachment order.
    pub fn on_mouse_down(
        &self,
        node: ElementId,
        handler: impl Fn(&Self, &mut MenuEvent) + 'static,
    ) {
        self.inner
            .handlers
            .borrow_mut()
            .entry(node)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Register a window-level mousedown listener.
    ///
    /// The listener stays registered while the returned guard is alive.
    pub fn add_window_listener(
        &self,
        listener: impl Fn(&Self, &mut MenuEvent) + 'static,
    ) -> ListenerGuard {
        let id = self.inner.listeners.borrow_mut().add(Rc::new(listener));
        log::trace!("window listener {id:?} registered");
        ListenerGuard::new(id, self.downgrade())
    }

    /// Number of registered window listeners.
    pub fn window_listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub(crate) fn remove_window_listener(&self, id: ListenerId) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove(id);
        let found = removed.is_some();
        // The listener may own the last reference to widget state; drop it unborrowed.
        drop(removed);
        if found {
            log::trace!("window listener {id:?} removed");
        }
        found
    }

    // --- interaction origin ---

    /// Record `event` as the most recent widget-internal mousedown.
    pub fn mark_menu_event(&self, event: &MenuEvent) {
        self.inner.origin.set(InteractionOrigin {
            time_ms: self.now_ms(),
            node: event.target,
        });
    }

    /// The most recent widget-internal mousedown.
    pub fn origin(&self) -> InteractionOrigin {
        self.inner.origin.get()
    }

    /// Returns true if the most recent widget-internal mousedown happened
    /// inside `wrapper` within the configured window.
    pub fn is_menu_event(&self, wrapper: ElementId) -> bool {
        let origin = self.origin();
        let now = self.now_ms();
        self.with_tree(|tree| {
            origin.is_menu_event(tree, wrapper, now, self.inner.config.menu_event_window_ms)
        })
    }

    // --- input ---

    /// Dispatch a mousedown on `target` (`None` for a mousedown outside the tree).
    ///
    /// Returns the event after dispatch so the host can honor
    /// [`MenuEvent::default_prevented`].
    pub fn mouse_down(&self, target: Option<ElementId>) -> MenuEvent {
        self.dispatch(MenuEvent::new(target))
    }

    /// Hit test `pt` under `root` and dispatch a mousedown on whatever it lands on.
    ///
    /// A point that hits nothing under `root` dispatches with no target.
    pub fn pointer_down(&self, root: ElementId, pt: Point) -> MenuEvent {
        let target = self.with_tree(|tree| tree.hit_test_point(root, pt).map(|hit| hit.node));
        self.dispatch(MenuEvent::new(target).at(pt))
    }

    /// Dispatch an already-built event: target, bubble, then window listeners.
    ///
    /// The window listener list is snapshotted when the window phase begins.
    /// Listeners registered earlier in the same dispatch run; listeners removed
    /// before their turn do not.
    pub fn dispatch(&self, mut event: MenuEvent) -> MenuEvent {
        let steps = self.with_tree(|tree| propagation_path(tree, event.target));
        log::trace!("mousedown on {:?}: {} steps", event.target, steps.len());
        for step in steps {
            match step.node {
                Some(node) => {
                    let handlers = self
                        .inner
                        .handlers
                        .borrow()
                        .get(&node)
                        .cloned()
                        .unwrap_or_default();
                    for handler in handlers {
                        handler(self, &mut event);
                    }
                }
                None => {
                    let ids = self.inner.listeners.borrow().ids();
                    for id in ids {
                        let Some(listener) = self.inner.listeners.borrow().get(id) else {
                            continue;
                        };
                        listener(self, &mut event);
                    }
                }
            }
        }
        event
    }

    /// Update hover state for a pointer at `pt` under `root`.
    ///
    /// Entered elements gain [`ElementFlags::HOVERED`], left elements lose it.
    pub fn pointer_move(&self, root: ElementId, pt: Point) -> Vec<HoverEvent<ElementId>> {
        let path = self.with_tree(|tree| {
            tree.hit_test_point(root, pt)
                .map(|hit| hit.path)
                .unwrap_or_default()
        });
        let transitions = self.inner.hover.borrow_mut().update_path(&path);
        self.apply_hover(&transitions);
        transitions
    }

    /// The pointer left the menu surface.
    pub fn pointer_leave(&self) -> Vec<HoverEvent<ElementId>> {
        let transitions = self.inner.hover.borrow_mut().clear();
        self.apply_hover(&transitions);
        transitions
    }

    /// Returns true if the pointer is over `node` or one of its descendants.
    pub fn is_hovered(&self, node: ElementId) -> bool {
        self.with_tree(|tree| tree.has_flag(node, ElementFlags::HOVERED))
    }

    fn apply_hover(&self, transitions: &[HoverEvent<ElementId>]) {
        self.with_tree_mut(|tree| {
            for t in transitions {
                match *t {
                    HoverEvent::Enter(id) => tree.set_flag(id, ElementFlags::HOVERED, true),
                    HoverEvent::Leave(id) => tree.set_flag(id, ElementFlags::HOVERED, false),
                }
            }
        });
    }
}
