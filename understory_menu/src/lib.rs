// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: headless menu widgets for a rich-text editor toolbar.
//!
//! ## Overview
//!
//! This crate renders toolbar widgets into an
//! [`understory_menu_tree::Tree`] and keeps their styling in sync with the
//! editor's state. It provides:
//!
//! - [`MenuItem`](crate::item::MenuItem): a clickable control bound to a command, with
//!   `select`/`enable`/`active` predicates.
//! - [`Dropdown`](crate::dropdown::Dropdown): a label that opens a panel of items.
//! - [`Submenu`](crate::submenu::Submenu): a nested panel inside a dropdown, shown on hover or tap.
//! - [`Group`](crate::group::Group): a plain vertical stack.
//!
//! Every widget implements [`MenuElement`](crate::display::MenuElement): `render` once,
//! then call the returned update function with every new editor state.
//!
//! ## Outside clicks
//!
//! Opening handlers record an [`InteractionOrigin`](crate::origin::InteractionOrigin) in the
//! [`MenuContext`](crate::context::MenuContext). Open widgets listen for window-level mousedowns
//! and close unless the most recent origin is recent enough
//! ([`MenuConfig::menu_event_window_ms`](crate::config::MenuConfig::menu_event_window_ms),
//! 100 ms by default) and lies inside their wrapper. Listeners are held by
//! [`ListenerGuard`](crate::listeners::ListenerGuard)s, so a widget that goes away takes its
//! listener with it.
//!
//! ## Dispatch
//!
//! A mousedown runs handlers on the target, then on its ancestors, then on window
//! listeners. See [`dispatch`](crate::dispatch) for the ordering rules.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_menu::clock::ManualClock;
//! use understory_menu::config::MenuConfig;
//! use understory_menu::context::MenuContext;
//! use understory_menu::display::MenuElement;
//! use understory_menu::item::{ItemSpec, MenuItem};
//! use understory_menu::view::EditorView;
//!
//! #[derive(Default)]
//! struct Editor {
//!     bold: RefCell<bool>,
//! }
//!
//! impl EditorView for Editor {
//!     type State = bool;
//!     type Transaction = bool;
//!     fn state(&self) -> bool {
//!         *self.bold.borrow()
//!     }
//!     fn dispatch(&self, bold: bool) {
//!         *self.bold.borrow_mut() = bold;
//!     }
//! }
//!
//! let cx = MenuContext::new(ManualClock::new(0), MenuConfig::default());
//! let editor = Rc::new(Editor::default());
//! let bold = MenuItem::new(
//!     ItemSpec::<Editor>::new(|bold: &bool, dispatch, _, _| dispatch(!*bold))
//!         .label("Bold")
//!         .active(|bold: &bool| *bold),
//! )
//! .unwrap();
//!
//! let mut rendered = bold.render(&cx, &editor).unwrap();
//! cx.mouse_down(Some(rendered.node));
//! assert!(editor.state());
//!
//! rendered.update(&editor.state());
//! cx.with_tree(|tree| assert!(tree.has_class(rendered.node, "ProseMirror-menu-active")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (on by default)
//! adds [`SystemClock`](crate::clock::SystemClock).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod classes;
pub mod clock;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod display;
pub mod dropdown;
pub mod error;
pub mod group;
pub mod hover;
pub mod icon;
pub mod item;
pub mod listeners;
pub mod origin;
pub mod submenu;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_util;
