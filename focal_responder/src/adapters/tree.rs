// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Focal Tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.

use focal_tree::{NodeId, Tree};

use crate::types::ParentLookup;

impl ParentLookup<NodeId> for Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Tree::parent_of(self, *node)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use focal_tree::{LocalNode, Tree};

    use crate::router::Router;

    #[test]
    fn router_reconstructs_tree_paths() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let branch = tree.insert(Some(root), LocalNode::default());
        let leaf = tree.insert(Some(branch), LocalNode::default());
        let stray = tree.insert(None, LocalNode::default());

        let router = Router::new(&tree);
        assert_eq!(
            router.propagation_path(leaf, Some(root)),
            Some(vec![root, branch, leaf])
        );
        assert_eq!(router.propagation_path(stray, Some(root)), None);
    }
}
