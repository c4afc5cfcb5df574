// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon descriptors and their elements.

use alloc::format;
use alloc::string::String;

use understory_menu_tree::{Element, ElementId};

use crate::classes;
use crate::context::MenuContext;

/// What an icon looks like.
#[derive(Clone, Debug, PartialEq)]
pub enum Icon {
    /// An SVG path drawn in a `width` × `height` view box.
    Path {
        /// View box width.
        width: f64,
        /// View box height.
        height: f64,
        /// SVG path data.
        path: String,
    },
    /// A short text glyph with optional extra inline style.
    Text {
        /// Glyph text.
        text: String,
        /// Extra inline style.
        css: Option<String>,
    },
    /// An element the host built itself. It is moved under the icon element.
    Element(ElementId),
}

impl Icon {
    /// Build the icon's element (detached) and return it.
    pub fn render(&self, cx: &MenuContext) -> ElementId {
        cx.with_tree_mut(|tree| {
            let icon = tree.insert(None, Element::with_class(classes::ICON));
            match self {
                Self::Path {
                    width,
                    height,
                    path,
                } => {
                    let svg = tree.insert(Some(icon), Element::default());
                    tree.set_attribute(svg, "viewBox", format!("0 0 {width} {height}"));
                    tree.set_attribute(svg, "d", path.as_str());
                }
                Self::Text { text, css } => {
                    let glyph = tree.insert(Some(icon), Element::default().text(text.as_str()));
                    if let Some(css) = css {
                        tree.append_style(glyph, css);
                    }
                }
                Self::Element(el) => {
                    tree.append_child(icon, *el);
                }
            }
            icon
        })
    }
}
