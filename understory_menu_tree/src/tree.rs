// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, styling mutators, queries.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{Element, ElementFlags, ElementId};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Headless element tree standing in for the DOM of a menu bar.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub node: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a detached root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element and its subtree.
    ///
    /// Returns every removed id (the element first, then descendants depth-first),
    /// so owners of per-element side tables can drop their entries.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        let mut removed = Vec::new();
        if !self.is_alive(id) {
            return removed;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id, &mut removed);
        removed
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns `false` (and changes nothing) if either id is stale or if the move
    /// would make an element its own ancestor.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || self.contains(child, parent) {
            return false;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        true
    }

    /// Unlink an element from its parent, keeping its subtree alive.
    ///
    /// Returns `true` if the element had a parent.
    pub fn detach(&mut self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        match self.node(id).parent {
            Some(parent) => {
                self.unlink_parent(id, parent);
                true
            }
            None => false,
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if the tree holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Borrow an element's data.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Mutably borrow an element's data.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.node_opt_mut(id).map(|n| &mut n.element)
    }

    /// Parent of an element, if attached.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element in order. Empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.node(id).parent;
        }
        false
    }

    /// The top-most ancestor of an element (itself when detached).
    pub fn root_of(&self, id: ElementId) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut id = id;
        while let Some(p) = self.node(id).parent {
            id = p;
        }
        Some(id)
    }

    /// Path from the root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut id = id;
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    // --- styling ---

    /// Add `class` to the element's class list if absent.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id)
            && !el.has_class(class)
        {
            el.classes.push(class.into());
        }
    }

    /// Remove `class` from the element's class list.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    /// Set a named attribute.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.attributes.insert(name.into(), value.into());
        }
    }

    /// Read a named attribute.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.attributes.get(name).map(String::as_str)
    }

    /// Append inline style text, separating declarations with `;`.
    pub fn append_style(&mut self, id: ElementId, css: &str) {
        if css.is_empty() {
            return;
        }
        if let Some(el) = self.get_mut(id) {
            if !el.style.is_empty() && !el.style.trim_end().ends_with(';') {
                el.style.push(';');
            }
            el.style.push_str(css);
        }
    }

    /// Text content of an element.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id)?.text.as_deref()
    }

    /// Hide or show an element (and with it, its subtree).
    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(el) = self.get_mut(id) {
            el.flags.set(ElementFlags::HIDDEN, hidden);
        }
    }

    /// Returns true if the element itself is flagged hidden.
    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.get(id)
            .is_some_and(|el| el.flags.contains(ElementFlags::HIDDEN))
    }

    /// Returns true if neither the element nor any ancestor is hidden.
    pub fn is_displayed(&self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(c) = cur {
            let n = self.node(c);
            if n.element.flags.contains(ElementFlags::HIDDEN) {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// Replace an element's flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(el) = self.get_mut(id) {
            el.flags = flags;
        }
    }

    /// Set or clear individual flags, leaving the others untouched.
    pub fn set_flag(&mut self, id: ElementId, flag: ElementFlags, on: bool) {
        if let Some(el) = self.get_mut(id) {
            el.flags.set(flag, on);
        }
    }

    /// Returns true if the element carries every bit of `flag`.
    pub fn has_flag(&self, id: ElementId, flag: ElementFlags) -> bool {
        self.get(id).is_some_and(|el| el.flags.contains(flag))
    }

    // --- geometry ---

    /// Update local bounds for an element.
    pub fn set_local_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(el) = self.get_mut(id) {
            el.local_bounds = bounds;
        }
    }

    /// Update the local transform for an element.
    pub fn set_local_transform(&mut self, id: ElementId, transform: Affine) {
        if let Some(el) = self.get_mut(id) {
            el.local_transform = transform;
        }
    }

    /// Update the stacking order for an element.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(el) = self.get_mut(id) {
            el.z_index = z;
        }
    }

    /// Accumulated root→element transform.
    pub fn world_transform(&self, id: ElementId) -> Affine {
        self.path_to_root(id)
            .into_iter()
            .fold(Affine::IDENTITY, |acc, n| {
                acc * self.node(n).element.local_transform
            })
    }

    /// World-space bounding box of an element's local bounds.
    pub fn world_bounds(&self, id: ElementId) -> Option<Rect> {
        let el = self.get(id)?;
        Some(transform_rect_bbox(self.world_transform(id), el.local_bounds))
    }

    /// Returns the topmost displayed, pickable element at a world-space point,
    /// searching only the subtree under `root`.
    ///
    /// Elements outside `root`, such as a detached panel, never receive hits.
    /// Hidden elements prune their whole subtree. Ranks by z-index, then by
    /// depth, so a child painted over its parent wins. Equal ranks resolve to
    /// the element later in document order.
    pub fn hit_test_point(&self, root: ElementId, pt: Point) -> Option<Hit> {
        let root_node = self.node_opt(root)?;
        if !self.is_displayed(root) {
            return None;
        }
        let base = self
            .parent(root)
            .map_or(Affine::IDENTITY, |parent| self.world_transform(parent));
        let mut best: Option<(ElementId, (i32, usize))> = None;
        let mut stack = vec![(root, 1_usize, base * root_node.element.local_transform)];
        while let Some((id, depth, world)) = stack.pop() {
            let node = self.node(id);
            if node.element.flags.contains(ElementFlags::HIDDEN) {
                continue;
            }
            if node.element.flags.contains(ElementFlags::PICKABLE) {
                let inverse = world.inverse();
                if inverse.is_finite() && node.element.local_bounds.contains(inverse * pt) {
                    let rank = (node.element.z_index, depth);
                    match best {
                        None => best = Some((id, rank)),
                        Some((_, best_rank)) if rank >= best_rank => best = Some((id, rank)),
                        _ => {}
                    }
                }
            }
            for &child in node.children.iter().rev() {
                let local = self.node(child).element.local_transform;
                stack.push((child, depth + 1, world * local));
            }
        }
        best.map(|(node, _)| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    // --- internals ---

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn remove_subtree(&mut self, id: ElementId, removed: &mut Vec<ElementId>) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        removed.push(id);
        for child in children {
            self.remove_subtree(child, removed);
        }
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
