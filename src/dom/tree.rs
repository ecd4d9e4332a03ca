//! Tree operations: insert, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for nodes without children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The central DOM tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Each mounted modal window is a subtree under the desktop root.
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a root-level node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as a child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist. Returns every removed id (subtree) via the out parameter-free
    /// companion [`Dom::remove_subtree`] when callers need them.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        let (data, _) = self.remove_subtree(id)?;
        Some(data)
    }

    /// Remove a node and all its descendants, returning the removed node's
    /// data and the ids of every removed node (in BFS order, `id` first).
    ///
    /// The id list lets the caller unwind per-node bookkeeping (lifecycle
    /// tracking, widget instances, computed styles).
    pub fn remove_subtree(&mut self, id: NodeId) -> Option<(NodeData, Vec<NodeId>)> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        // Detach from parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        if self.root == Some(id) {
            self.root = None;
        }

        let mut queue = VecDeque::new();
        queue.push_back(id);
        let mut removed_ids = Vec::new();
        let mut removed_root_data = None;

        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    queue.push_back(child);
                }
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
            removed_ids.push(current);
        }

        removed_root_data.map(|data| (data, removed_ids))
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Walk the subtree rooted at `id` depth-first (pre-order), including `id`.
    pub fn walk_depth_first(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so they pop in document order.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the DOM.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Desktop with two windows, one of which has a title bar and content.
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let desktop = dom.insert(NodeData::new("Desktop"));
        let notepad = dom.insert_child(desktop, NodeData::new("Modal"));
        let paint = dom.insert_child(desktop, NodeData::new("Modal"));
        let title = dom.insert_child(notepad, NodeData::new("TitleBar"));
        let content = dom.insert_child(notepad, NodeData::new("Content"));
        (dom, desktop, notepad, paint, title, content)
    }

    #[test]
    fn empty_dom() {
        let dom = Dom::new();
        assert!(dom.is_empty());
        assert_eq!(dom.len(), 0);
        assert!(dom.root().is_none());
    }

    #[test]
    fn first_insert_becomes_root() {
        let mut dom = Dom::new();
        let id = dom.insert(NodeData::new("Desktop"));
        assert_eq!(dom.root(), Some(id));
        assert_eq!(dom.len(), 1);
    }

    #[test]
    fn insert_child_links_both_ways() {
        let (dom, desktop, notepad, ..) = build_tree();
        assert_eq!(dom.parent(notepad), Some(desktop));
        assert!(dom.children(desktop).contains(&notepad));
    }

    #[test]
    fn children_in_insertion_order() {
        let (dom, desktop, notepad, paint, ..) = build_tree();
        assert_eq!(dom.children(desktop), &[notepad, paint]);
    }

    #[test]
    fn children_of_unknown_node_is_empty() {
        let (mut dom, _, notepad, ..) = build_tree();
        dom.remove(notepad);
        assert!(dom.children(notepad).is_empty());
    }

    #[test]
    fn ancestors_walk_to_root() {
        let (dom, desktop, notepad, _, title, _) = build_tree();
        assert_eq!(dom.ancestors(title), vec![notepad, desktop]);
        assert!(dom.ancestors(desktop).is_empty());
    }

    #[test]
    fn remove_detaches_from_parent() {
        let (mut dom, desktop, notepad, paint, ..) = build_tree();
        let data = dom.remove(notepad);
        assert!(data.is_some());
        assert_eq!(dom.children(desktop), &[paint]);
        assert!(!dom.contains(notepad));
    }

    #[test]
    fn remove_takes_subtree() {
        let (mut dom, _, notepad, _, title, content) = build_tree();
        dom.remove(notepad);
        assert!(!dom.contains(title));
        assert!(!dom.contains(content));
        assert_eq!(dom.len(), 2); // desktop + paint
    }

    #[test]
    fn remove_subtree_reports_all_ids() {
        let (mut dom, _, notepad, _, title, content) = build_tree();
        let (data, ids) = dom.remove_subtree(notepad).unwrap();
        assert_eq!(data.widget_type, "Modal");
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], notepad);
        assert!(ids.contains(&title));
        assert!(ids.contains(&content));
    }

    #[test]
    fn remove_unknown_is_none() {
        let (mut dom, _, notepad, ..) = build_tree();
        dom.remove(notepad);
        assert!(dom.remove(notepad).is_none());
    }

    #[test]
    fn remove_root_clears_root() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("Desktop"));
        dom.remove(root);
        assert!(dom.root().is_none());
        assert!(dom.is_empty());
    }

    #[test]
    fn walk_depth_first_preorder() {
        let (dom, desktop, notepad, paint, title, content) = build_tree();
        let walk = dom.walk_depth_first(desktop);
        assert_eq!(walk, vec![desktop, notepad, title, content, paint]);
    }

    #[test]
    fn walk_depth_first_from_subtree() {
        let (dom, _, notepad, _, title, content) = build_tree();
        let walk = dom.walk_depth_first(notepad);
        assert_eq!(walk, vec![notepad, title, content]);
    }

    #[test]
    fn get_and_get_mut() {
        let (mut dom, _, notepad, ..) = build_tree();
        assert_eq!(dom.get(notepad).unwrap().widget_type, "Modal");
        dom.get_mut(notepad).unwrap().active = true;
        assert!(dom.get(notepad).unwrap().active);
    }

    #[test]
    fn stale_id_lookups_are_none() {
        let (mut dom, _, notepad, ..) = build_tree();
        dom.remove(notepad);
        assert!(dom.get(notepad).is_none());
        assert!(dom.parent(notepad).is_none());
        assert!(dom.ancestors(notepad).is_empty());
        assert!(dom.walk_depth_first(notepad).is_empty());
    }
}
