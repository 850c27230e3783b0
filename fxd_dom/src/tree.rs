// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, element data, queries.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use smallvec::SmallVec;

use crate::types::{ElementFlags, NodeId};

/// A headless document.
///
/// The document owns every node and hands out generational [`NodeId`] handles.
/// Nodes are created detached and become part of the document once attached under
/// [`Document::root`] (directly or through ancestors).
///
/// Besides structure, the document tracks the focused element, text selection in
/// inputs, and the most recent scroll-into-view request.
///
/// ## Example
///
/// ```rust
/// use fxd_dom::Document;
///
/// let mut doc = Document::new();
/// let div = doc.create_element("DIV");
/// doc.append_child(doc.root(), div);
/// doc.add_classes(div, "dropdown  show");
///
/// assert_eq!(doc.tag(div), Some("div"));
/// assert!(doc.has_class(div, "show"));
/// assert!(doc.is_connected(div));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    active: Option<NodeId>,
    scrolled_into_view: Option<NodeId>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) classes: SmallVec<[String; 4]>,
    pub(crate) style: Vec<(String, String)>,
    pub(crate) flags: ElementFlags,
    pub(crate) value: String,
    pub(crate) selection: Option<(usize, usize)>,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeData {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    fn new(generation: u32, data: NodeData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl Document {
    /// Create an empty document containing only its root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            active: None,
            scrolled_into_view: None,
        };
        doc.root = doc.alloc(NodeData::Root);
        doc
    }

    /// The document root (`#document`). It is never removed.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a detached element. The tag name is stored lower-cased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: SmallVec::new(),
            style: Vec::new(),
            flags: ElementFlags::empty(),
            value: String::new(),
            selection: None,
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    ///
    /// Does nothing if either id is stale, if `child` is the root, or if `child` is an
    /// ancestor of (or equal to) `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `node` as the next sibling of `reference`, detaching it from any previous parent.
    ///
    /// Does nothing if `reference` has no parent, or under the same conditions as
    /// [`Document::append_child`].
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent_of(reference) else {
            return;
        };
        if reference == node || !self.can_adopt(parent, node) {
            return;
        }
        self.detach(node);
        let siblings = &mut self.node_mut(parent).children;
        let pos = siblings
            .iter()
            .position(|&id| id == reference)
            .map_or(siblings.len(), |p| p + 1);
        siblings.insert(pos, node);
        self.node_mut(node).parent = Some(parent);
    }

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_alive(parent)
            && self.is_alive(child)
            && child != self.root
            && !self.contains(child, parent)
            && !matches!(self.node(parent).data, NodeData::Text(_))
    }

    /// Detach `id` from its parent without freeing it.
    pub fn detach(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Remove `id` and its whole subtree, invalidating their ids.
    ///
    /// Removing the root only clears its children.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if id == self.root {
            self.clear_children(id);
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        if self.active == Some(id) {
            self.active = None;
        }
        if self.scrolled_into_view == Some(id) {
            self.scrolled_into_view = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Remove every child of `id` (and their subtrees).
    pub fn clear_children(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns true if `id` is live and attached (transitively) under the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&Element> {
        if !self.is_alive(id) {
            return None;
        }
        match &self.node(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        if !self.is_alive(id) {
            return None;
        }
        match &mut self.node_mut(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    // --- structure queries ---

    /// Returns the parent of a node if live, or `None` for detached nodes, the root, or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent_of(id);
        }
        false
    }

    /// Walk from `node` (inclusive) towards the root and return the first node matching `pred`.
    pub fn closest(&self, node: NodeId, mut pred: impl FnMut(&Self, NodeId) -> bool) -> Option<NodeId> {
        let mut cur = Some(node).filter(|&id| self.is_alive(id));
        while let Some(id) = cur {
            if pred(self, id) {
                return Some(id);
            }
            cur = self.parent_of(id);
        }
        None
    }

    /// All descendants of `id` (exclusive) in depth-first document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).children.iter().rev().copied());
        }
        out
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next) = self.sibling(node, 1) {
                return Some(next);
            }
            node = parent;
        }
        None
    }

    /// Get the previous node in reverse depth-first traversal order.
    ///
    /// Returns `None` if no previous node exists or if the current node is stale.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(mut node) = self.sibling(current, -1) {
            while let Some(&last) = self.node(node).children.last() {
                node = last;
            }
            return Some(node);
        }
        self.parent_of(current)
    }

    fn sibling(&self, node: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos.checked_add_signed(offset)?).copied()
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    /// Connected elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.tag(n).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    // --- element data ---

    /// Lower-cased tag name of an element, or `None` for text nodes, the root, or stale ids.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Returns true if `id` is a live element with the given tag (ASCII case-insensitive).
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Contents of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        if !self.is_alive(id) {
            return None;
        }
        match &self.node(id).data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Value of an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the element carries the attribute.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Attributes of an element in insertion order.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id).map_or(&[], |el| el.attributes.as_slice())
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        if let Some(slot) = el.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            el.attributes.push((name.to_string(), value.to_string()));
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.retain(|(k, _)| k != name);
        }
    }

    /// Class list of an element.
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map_or(&[], |el| el.classes.as_slice())
    }

    /// Returns true if the element's class list contains `name`.
    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.classes(id).iter().any(|c| c == name)
    }

    /// Add a single class token. Duplicates are ignored.
    pub fn add_class(&mut self, id: NodeId, name: &str) {
        if name.is_empty() {
            return;
        }
        if let Some(el) = self.element_mut(id)
            && !el.classes.iter().any(|c| c == name)
        {
            el.classes.push(name.to_string());
        }
    }

    /// Add every whitespace-separated token of `list`.
    pub fn add_classes(&mut self, id: NodeId, list: &str) {
        for token in list.split_ascii_whitespace() {
            self.add_class(id, token);
        }
    }

    /// Remove a class token.
    pub fn remove_class(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.classes.retain(|c| c != name);
        }
    }

    /// Toggle a class token; `force` pins the outcome. Returns whether the class is now present.
    pub fn toggle_class(&mut self, id: NodeId, name: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or_else(|| !self.has_class(id, name));
        if on {
            self.add_class(id, name);
        } else {
            self.remove_class(id, name);
        }
        self.has_class(id, name)
    }

    /// Inline style property.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?
            .style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        if let Some(slot) = el.style.iter_mut().find(|(k, _)| k == property) {
            slot.1 = value.to_string();
        } else {
            el.style.push((property.to_string(), value.to_string()));
        }
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(el) = self.element_mut(id) {
            el.style.retain(|(k, _)| k != property);
        }
    }

    /// Returns the flags of an element if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<ElementFlags> {
        self.element(id).map(|el| el.flags)
    }

    /// Set or clear a flag.
    pub fn set_flag(&mut self, id: NodeId, flag: ElementFlags, on: bool) {
        if let Some(el) = self.element_mut(id) {
            el.flags.set(flag, on);
        }
    }

    /// Returns true if the element is disabled.
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.flags(id).is_some_and(|f| f.contains(ElementFlags::DISABLED))
    }

    /// Set the disabled state.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        self.set_flag(id, ElementFlags::DISABLED, disabled);
    }

    // --- inputs ---

    /// Current value of an input element.
    pub fn value(&self, id: NodeId) -> &str {
        self.element(id).map_or("", |el| el.value.as_str())
    }

    /// Set the value of an input element. Any text selection is collapsed.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.value = value.to_string();
            el.selection = None;
        }
    }

    /// Select the whole text of an input.
    pub fn select_text(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.selection = Some((0, el.value.chars().count()));
        }
    }

    /// Current text selection `(start, end)` in characters, if any.
    pub fn selection(&self, id: NodeId) -> Option<(usize, usize)> {
        self.element(id)?.selection
    }

    // --- text ---

    /// Concatenated text of every text node under `id`, or the text itself for text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(t) = self.text(id) {
            return t.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Replace the children of `id` with a single text node (none for an empty string).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.element(id).is_none() {
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(id, t);
        }
    }

    // --- document state ---

    /// Move focus to `id`. Stale or detached ids are ignored.
    pub fn focus(&mut self, id: NodeId) {
        if self.is_connected(id) {
            self.active = Some(id);
        }
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The focused element, if it is still alive.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&id| self.is_alive(id))
    }

    /// Request that `id` be scrolled into view. The last request is recorded for the host.
    pub fn scroll_into_view(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.scrolled_into_view = Some(id);
        }
    }

    /// The most recent scroll-into-view request.
    pub fn scrolled_into_view(&self) -> Option<NodeId> {
        self.scrolled_into_view.filter(|&id| self.is_alive(id))
    }
}
