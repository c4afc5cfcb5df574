// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window-level mousedown listeners.
//!
//! ## Overview
//!
//! Outside-click handling needs a listener that sees every mousedown, wherever
//! it lands. Registering one yields a [`ListenerGuard`]; the listener stays
//! registered exactly as long as the guard is held. Dropping the guard (or
//! calling [`ListenerGuard::release`]) deregisters it, so a widget cannot close
//! without also releasing its listener.
//!
//! Listeners run in registration order during the [`Window`](crate::types::Phase::Window)
//! phase of each dispatch.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::context::{MenuContext, WeakMenuContext};
use crate::types::MenuEvent;

/// A window-level mousedown listener.
pub type WindowListener = Rc<dyn Fn(&MenuContext, &mut MenuEvent)>;

/// Identifier of a registered window listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerId(u64);

/// Registration-ordered listener table.
#[derive(Default)]
pub(crate) struct WindowListeners {
    next: u64,
    entries: Vec<(ListenerId, WindowListener)>,
}

impl core::fmt::Debug for WindowListeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowListeners")
            .field("len", &self.entries.len())
            .field("next", &self.next)
            .finish()
    }
}

impl WindowListeners {
    pub(crate) fn add(&mut self, listener: WindowListener) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener, handing it back so the caller can drop it outside any borrow.
    pub(crate) fn remove(&mut self, id: ListenerId) -> Option<WindowListener> {
        let pos = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub(crate) fn get(&self, id: ListenerId) -> Option<WindowListener> {
        self.entries
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, l)| l.clone())
    }

    /// Snapshot of the registered ids, in registration order.
    pub(crate) fn ids(&self) -> Vec<ListenerId> {
        self.entries.iter().map(|(i, _)| *i).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Keeps a window listener registered; deregisters it on release or drop.
#[must_use = "dropping the guard deregisters the listener immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    cx: Option<WeakMenuContext>,
}

impl ListenerGuard {
    pub(crate) fn new(id: ListenerId, cx: WeakMenuContext) -> Self {
        Self { id, cx: Some(cx) }
    }

    /// Identifier of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Deregister now.
    ///
    /// Returns `false` if the listener was already gone (for example because
    /// the context was dropped).
    pub fn release(mut self) -> bool {
        self.release_inner()
    }

    fn release_inner(&mut self) -> bool {
        let Some(cx) = self.cx.take().and_then(|weak| weak.upgrade()) else {
            return false;
        };
        cx.remove_window_listener(self.id)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}
