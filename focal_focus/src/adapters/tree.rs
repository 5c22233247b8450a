// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab navigation over a Focal Tree.

use focal_tree::{NodeId, Tree};

use crate::TabTree;

impl TabTree<NodeId> for Tree {
    fn tab_index(&self, node: NodeId) -> Option<i32> {
        Tree::tab_index(self, node)
    }

    fn is_interactive(&self, node: NodeId) -> bool {
        Tree::is_interactive(self, node)
    }

    fn interactive_children(&self, node: NodeId) -> bool {
        Tree::interactive_children(self, node)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.children_of(node)
    }
}
