// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation sequence for a mousedown.
//!
//! ## Overview
//!
//! Mirrors what a browser does with a mousedown that no handler stops:
//! the target's handlers run, then each ancestor's (bubble), then the
//! window-level listeners.
//!
//! There is no capture phase; menu widgets never register capturing handlers.
//!
//! ## Window phase
//!
//! The sequence always ends with a single [`Phase::Window`] step, even when the
//! target is `None` (the pointer went down outside the menu tree). That is the
//! step outside-click listeners observe.

use alloc::vec::Vec;

use understory_menu_tree::{ElementId, Tree};

use crate::types::{DispatchStep, Phase};

/// Build the target → bubble → window sequence for a mousedown on `target`.
///
/// Stale targets are treated like a mousedown outside the tree.
pub fn propagation_path(tree: &Tree, target: Option<ElementId>) -> Vec<DispatchStep> {
    let mut out = Vec::new();
    if let Some(target) = target {
        let path = tree.path_to_root(target);
        for (i, &node) in path.iter().rev().enumerate() {
            out.push(DispatchStep {
                phase: if i == 0 { Phase::Target } else { Phase::Bubble },
                node: Some(node),
            });
        }
    }
    out.push(DispatchStep {
        phase: Phase::Window,
        node: None,
    });
    out
}
