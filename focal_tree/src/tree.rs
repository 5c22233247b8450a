// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{LocalNode, NodeFlags, NodeId};

/// Scene tree arena.
///
/// Nodes are addressed by generational [`NodeId`]s. A tree may hold several roots,
/// for example one per rendering surface and one per embedded sub-surface.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use focal_tree::{LocalNode, NodeFlags, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, LocalNode::default());
/// let button = tree.insert(
///     Some(root),
///     LocalNode {
///         hit_area: Some(Rect::new(0.0, 0.0, 100.0, 40.0)),
///         tab_index: Some(0),
///         flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
///     },
/// );
///
/// let hit = tree.hit_test(root, Point::new(10.0, 10.0)).unwrap();
/// assert_eq!(hit.node, button);
/// assert_eq!(hit.path, vec![root, button]);
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
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

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from the queried root to node (inclusive).
    pub path: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
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

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` leaves the new node detached.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree from the tree.
    ///
    /// Returns the freed identifiers, the removed node first. Stale ids yield an empty list.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        let mut freed = Vec::new();
        if !self.is_alive(id) {
            return freed;
        }
        self.detach(id);
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let node = self.nodes[current.idx()]
                .take()
                .expect("subtree only holds live nodes");
            stack.extend(node.children.iter().rev().copied());
            self.free_list.push(current.idx());
            freed.push(current);
        }
        freed
    }

    /// Unlink `id` from its parent, keeping the node (and its subtree) alive.
    ///
    /// Returns the former parent, or `None` if the node was already a root or is stale.
    pub fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        self.unlink_parent(id, parent);
        Some(parent)
    }

    /// Move `id` to the end of `new_parent`'s children (or make it a root if `None`).
    ///
    /// Returns `false` and leaves the tree untouched if either id is stale or if the
    /// move would make a node its own ancestor.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.is_ancestor_or_self(id, p))
        {
            return false;
        }
        self.detach(id);
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        true
    }

    /// Update the tab index.
    pub fn set_tab_index(&mut self, id: NodeId, tab_index: Option<i32>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.tab_index = tab_index;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Update the hit area.
    pub fn set_hit_area(&mut self, id: NodeId, hit_area: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.hit_area = hit_area;
        }
    }

    /// Hit test a surface-space point against the subtree rooted at `root`.
    ///
    /// Returns the deepest interactive node whose hit area contains the point, together
    /// with its path from `root`. Later children are on top of earlier ones, so they are
    /// tested first. A hit area that misses the point hides the node's whole subtree, as
    /// does a missing [`NodeFlags::VISIBLE`] flag; children are only searched through
    /// [`NodeFlags::INTERACTIVE_CHILDREN`].
    pub fn hit_test(&self, root: NodeId, point: Point) -> Option<Hit> {
        if !self.is_alive(root) || !self.admits(root, point) {
            return None;
        }
        // Depth-first with an explicit stack: each frame holds a node and how many of its
        // children are still to be tried, last child first.
        let mut stack = alloc::vec![(root, self.searchable_children(root))];
        while let Some(top) = stack.last_mut() {
            let (id, remaining) = *top;
            if remaining > 0 {
                top.1 -= 1;
                let child = self.node(id).children[remaining - 1];
                if self.admits(child, point) {
                    stack.push((child, self.searchable_children(child)));
                }
                continue;
            }
            let local = &self.node(id).local;
            if local.flags.contains(NodeFlags::INTERACTIVE)
                && local.hit_area.is_some_and(|area| area.contains(point))
            {
                let path = stack.iter().map(|&(n, _)| n).collect();
                return Some(Hit { node: id, path });
            }
            stack.pop();
        }
        None
    }

    /// Whether the subtree at `id` can contain a hit at `point`.
    fn admits(&self, id: NodeId, point: Point) -> bool {
        let local = &self.node(id).local;
        local.flags.contains(NodeFlags::VISIBLE)
            && local.hit_area.is_none_or(|area| area.contains(point))
    }

    fn searchable_children(&self, id: NodeId) -> usize {
        let node = self.node(id);
        if node.local.flags.contains(NodeFlags::INTERACTIVE_CHILDREN) {
            node.children.len()
        } else {
            0
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

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|node| node.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the topmost ancestor of a live node (the node itself for roots).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.node_opt(id).map(|_| id)?;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        Some(current)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|node| node.local.flags)
    }

    /// Returns the tab index of a live node.
    pub fn tab_index(&self, id: NodeId) -> Option<i32> {
        self.node_opt(id).and_then(|node| node.local.tab_index)
    }

    /// Returns the hit area of a live node.
    pub fn hit_area(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).and_then(|node| node.local.hit_area)
    }

    /// Whether a live node carries [`NodeFlags::INTERACTIVE`].
    pub fn is_interactive(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::INTERACTIVE))
    }

    /// Whether a live node carries [`NodeFlags::INTERACTIVE_CHILDREN`].
    pub fn interactive_children(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::INTERACTIVE_CHILDREN))
    }

    // --- internals ---

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent_of(n);
        }
        false
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn interactive(hit_area: Option<Rect>) -> LocalNode {
        LocalNode {
            hit_area,
            tab_index: None,
            flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
        }
    }

    #[test]
    fn insert_links_children_in_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let b = tree.insert(Some(root), LocalNode::default());
        assert_eq!(tree.children_of(root), &[a, b]);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.parent_of(root), None);
        assert_eq!(tree.root_of(b), Some(root));
    }

    #[test]
    fn remove_frees_subtree_and_invalidates_ids() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let branch = tree.insert(Some(root), LocalNode::default());
        let leaf = tree.insert(Some(branch), LocalNode::default());

        let freed = tree.remove(branch);
        assert_eq!(freed, vec![branch, leaf]);
        assert!(!tree.is_alive(branch));
        assert!(!tree.is_alive(leaf));
        assert!(tree.children_of(root).is_empty());

        // Slots are reused with a bumped generation.
        let fresh = tree.insert(Some(root), LocalNode::default());
        assert!(tree.is_alive(fresh));
        assert_eq!(fresh.idx(), leaf.idx());
        assert_ne!(fresh, leaf);
        assert!(!tree.is_alive(leaf));
        assert_eq!(tree.parent_of(leaf), None);
    }

    #[test]
    fn detach_keeps_node_alive() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let child = tree.insert(Some(root), LocalNode::default());
        assert_eq!(tree.detach(child), Some(root));
        assert!(tree.is_alive(child));
        assert_eq!(tree.parent_of(child), None);
        assert_eq!(tree.detach(child), None);
    }

    #[test]
    fn reparent_refuses_cycles() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let branch = tree.insert(Some(root), LocalNode::default());
        let leaf = tree.insert(Some(branch), LocalNode::default());

        assert!(!tree.reparent(root, Some(leaf)));
        assert!(!tree.reparent(branch, Some(branch)));
        assert_eq!(tree.parent_of(root), None);

        assert!(tree.reparent(leaf, Some(root)));
        assert_eq!(tree.children_of(root), &[branch, leaf]);
        assert!(tree.children_of(branch).is_empty());
    }

    #[test]
    fn hit_test_returns_deepest_topmost_node() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let under = tree.insert(Some(root), interactive(Some(Rect::new(0.0, 0.0, 100.0, 100.0))));
        let over = tree.insert(Some(root), interactive(Some(Rect::new(50.0, 50.0, 150.0, 150.0))));

        let hit = tree.hit_test(root, Point::new(75.0, 75.0)).unwrap();
        assert_eq!(hit.node, over, "later sibling is on top");
        assert_eq!(hit.path, vec![root, over]);

        let hit = tree.hit_test(root, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.node, under);

        assert!(tree.hit_test(root, Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn hit_area_prunes_subtree() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let host = tree.insert(Some(root), interactive(Some(Rect::new(0.0, 0.0, 10.0, 10.0))));
        let _inner = tree.insert(Some(host), interactive(Some(Rect::new(20.0, 20.0, 30.0, 30.0))));
        assert!(tree.hit_test(root, Point::new(25.0, 25.0)).is_none());
    }

    #[test]
    fn non_interactive_nodes_are_transparent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let container = tree.insert(
            Some(root),
            LocalNode {
                hit_area: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
                ..LocalNode::default()
            },
        );
        let leaf = tree.insert(Some(container), interactive(Some(Rect::new(0.0, 0.0, 50.0, 50.0))));

        let hit = tree.hit_test(root, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(hit.node, leaf);
        assert_eq!(hit.path, vec![root, container, leaf]);
        // Inside the container only: the container itself is not interactive.
        assert!(tree.hit_test(root, Point::new(75.0, 75.0)).is_none());
    }

    #[test]
    fn interactive_children_and_visibility_gate_hits() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let leaf = tree.insert(Some(root), interactive(Some(Rect::new(0.0, 0.0, 50.0, 50.0))));
        let pt = Point::new(10.0, 10.0);
        assert_eq!(tree.hit_test(root, pt).map(|h| h.node), Some(leaf));

        tree.set_flags(root, NodeFlags::VISIBLE);
        assert!(tree.hit_test(root, pt).is_none());

        tree.set_flags(root, NodeFlags::default());
        tree.set_flags(leaf, NodeFlags::INTERACTIVE);
        assert!(tree.hit_test(root, pt).is_none());
    }

    #[test]
    fn hit_test_handles_very_deep_chains() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let mut leaf = root;
        for _ in 0..100_000 {
            leaf = tree.insert(Some(leaf), LocalNode::default());
        }
        tree.set_flags(leaf, NodeFlags::default() | NodeFlags::INTERACTIVE);
        tree.set_hit_area(leaf, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));

        let hit = tree.hit_test(root, Point::new(5.0, 5.0)).unwrap();
        assert_eq!(hit.node, leaf);
        assert_eq!(hit.path.len(), 100_001);
        assert_eq!(hit.path.first(), Some(&root));
        assert!(tree.hit_test(root, Point::new(50.0, 5.0)).is_none());
    }

    #[test]
    fn setters_ignore_stale_ids() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        tree.remove(root);
        tree.set_tab_index(root, Some(0));
        tree.set_hit_area(root, Some(Rect::ZERO));
        assert_eq!(tree.tab_index(root), None);
        assert_eq!(tree.hit_area(root), None);
        assert!(!tree.is_interactive(root));
    }
}
