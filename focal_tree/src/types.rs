// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, and per-node data.

use kurbo::Rect;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Invisible nodes are skipped by hit testing together with their subtree.
        const VISIBLE              = 0b0000_0001;
        /// Node is interactive: it can be hit, receives routed events, and may take focus.
        const INTERACTIVE          = 0b0000_0010;
        /// Children of this node take part in hit testing and tab navigation.
        const INTERACTIVE_CHILDREN = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE_CHILDREN
    }
}

/// Per-node data supplied by the scene owner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalNode {
    /// Hit area in surface coordinates.
    ///
    /// A node without a hit area is never a hit itself, but its children still are.
    /// A node with a hit area that does not contain the query point hides its whole subtree.
    pub hit_area: Option<Rect>,
    /// Tab index; `None` means the node cannot take focus at all.
    ///
    /// Negative values allow programmatic and pointer focus but exclude the node from
    /// keyboard tab navigation.
    pub tab_index: Option<i32>,
    /// Visibility and interactivity flags.
    pub flags: NodeFlags,
}
