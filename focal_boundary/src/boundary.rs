// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-boundary state.

use alloc::vec::Vec;

use focal_responder::listeners::ListenerId;
use focal_tree::NodeId;
use hashbrown::HashMap;

/// Maximum number of ancestor hops taken when walking up from a node, and the maximum
/// length of a focus path.
pub const PROPAGATION_LIMIT: usize = 2048;

/// Maximum depth of re-entrant [`map_event`](crate::EventSystem::map_event) calls, for
/// example through chains of nested boundaries.
pub const NESTING_LIMIT: u32 = 64;

/// Handle of a boundary owned by an [`EventSystem`](crate::EventSystem).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryId(pub(crate) u32);

impl BoundaryId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Options for [`EventSystem::create_boundary`](crate::EventSystem::create_boundary).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryOptions {
    /// Blur the boundary when a node on its focus path is detached from its parent.
    pub auto_blur_disconnected_target: bool,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            auto_blur_disconnected_target: true,
        }
    }
}

/// A routing context: one root, one focus path, one debouncing state.
#[derive(Debug)]
pub(crate) struct Boundary {
    pub(crate) root: Option<NodeId>,
    /// Root → active element; empty when nothing is focused.
    pub(crate) focus_path: Vec<NodeId>,
    pub(crate) debounce_depth: u32,
    /// Outer `None`: nothing recorded while debouncing. `Some(None)`: a blur was recorded.
    pub(crate) pending: Option<Option<NodeId>>,
    pub(crate) auto_blur: bool,
    /// One-shot `Removed` listeners installed on focus path nodes.
    pub(crate) removal_hooks: HashMap<NodeId, ListenerId>,
    /// Time stamp of the last event mapped by this boundary.
    pub(crate) time_stamp: f64,
}

impl Boundary {
    pub(crate) fn new(root: Option<NodeId>, options: BoundaryOptions) -> Self {
        Self {
            root,
            focus_path: Vec::new(),
            debounce_depth: 0,
            pending: None,
            auto_blur: options.auto_blur_disconnected_target,
            removal_hooks: HashMap::new(),
            time_stamp: 0.0,
        }
    }

    pub(crate) fn active_element(&self) -> Option<NodeId> {
        self.focus_path.last().copied()
    }
}
