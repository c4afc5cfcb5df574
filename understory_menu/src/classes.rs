// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names applied by the widgets.
//!
//! Host stylesheets key off these strings; they are part of the public
//! styling contract and do not change between releases.

/// Item whose `enable` predicate returned false.
pub const DISABLED: &str = "ProseMirror-menu-disabled";
/// Enabled item whose `active` predicate returned true.
pub const ACTIVE: &str = "ProseMirror-menu-active";
/// Dropdown label.
pub const DROPDOWN: &str = "ProseMirror-menu-dropdown";
/// Element wrapping a dropdown label and, while open, its panel.
pub const DROPDOWN_WRAP: &str = "ProseMirror-menu-dropdown-wrap";
/// Dropdown overlay panel.
pub const DROPDOWN_MENU: &str = "ProseMirror-menu-dropdown-menu";
/// Container around each child of a dropdown or submenu panel.
pub const DROPDOWN_ITEM: &str = "ProseMirror-menu-dropdown-item";
/// Submenu label.
pub const SUBMENU_LABEL: &str = "ProseMirror-menu-submenu-label";
/// Element wrapping a submenu label and its panel.
pub const SUBMENU_WRAP: &str = "ProseMirror-menu-submenu-wrap";
/// Added to [`SUBMENU_WRAP`] while the submenu is expanded.
pub const SUBMENU_WRAP_ACTIVE: &str = "ProseMirror-menu-submenu-wrap-active";
/// Submenu panel.
pub const SUBMENU: &str = "ProseMirror-menu-submenu";
/// Container around each child of a standalone group.
pub const MENUITEM: &str = "ProseMirror-menuitem";
/// Standalone group container.
pub const GROUP: &str = "ProseMirror-menu-group";
/// Icon element.
pub const ICON: &str = "ProseMirror-icon";
