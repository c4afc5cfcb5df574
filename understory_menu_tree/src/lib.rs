// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu_tree --heading-base-level=0

//! Understory Menu Tree: a headless element tree for menu bars.
//!
//! This crate is the document-object layer that `understory_menu` widgets render into.
//! It models exactly what toolbar, dropdown, and submenu widgets need from a DOM and nothing more:
//!
//! - Generational [`ElementId`] handles with parent/child links.
//! - Attach and detach of whole subtrees ([`Tree::append_child`], [`Tree::detach`]).
//! - Ancestry checks ([`Tree::contains`]) used to classify clicks as inside or outside a widget.
//! - Class lists, named attributes, inline style text, and a display-hidden flag.
//! - Optional geometry (local bounds, local transform, z-index) so a host can resolve a raw
//!   pointer position under its document root into a target with [`Tree::hit_test_point`].
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! Hosts that want pointer hit testing compute boxes with their own layout system and write
//! them back with [`Tree::set_local_bounds`] and [`Tree::set_local_transform`].
//!
//! ## API overview
//!
//! - [`Tree`]: container managing elements.
//! - [`Element`]: per-element data (text, classes, attributes, style, flags, geometry).
//! - [`ElementFlags`]: display, picking, and hover controls.
//! - [`ElementId`]: generational handle of an element.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_menu_tree::{Element, Tree};
//!
//! let mut tree = Tree::new();
//! let bar = tree.insert(None, Element::with_class("ProseMirror-menubar"));
//! let wrap = tree.insert(Some(bar), Element::with_class("ProseMirror-menu-dropdown-wrap"));
//! let panel = tree.insert(None, Element::with_class("ProseMirror-menu-dropdown-menu"));
//!
//! // Open: attach the panel under the wrapper.
//! tree.append_child(wrap, panel);
//! assert!(tree.contains(bar, panel));
//!
//! // Close: detach it again; the panel and its items stay alive for the next open.
//! tree.detach(panel);
//! assert!(!tree.contains(bar, panel));
//! assert!(tree.is_alive(panel));
//! ```
//!
//! ### Hit testing
//!
//! ```
//! use understory_menu_tree::{Element, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let bar = tree.insert(
//!     None,
//!     Element::default().bounds(Rect::new(0.0, 0.0, 300.0, 30.0)),
//! );
//! let bold = tree.insert(
//!     Some(bar),
//!     Element::default().bounds(Rect::new(0.0, 0.0, 30.0, 30.0)),
//! );
//! // A detached panel overlapping the bar is out of reach until attached.
//! let panel = tree.insert(
//!     None,
//!     Element::default().bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
//! );
//!
//! let hit = tree.hit_test_point(bar, Point::new(10.0, 10.0)).unwrap();
//! assert_eq!(hit.node, bold);
//! assert_eq!(hit.path, vec![bar, bold]);
//! assert_ne!(hit.node, panel);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, Tree};
pub use types::{Element, ElementFlags, ElementId};
