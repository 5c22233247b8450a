// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus state and transition events.
//!
//! Moving focus from one node to another fires, in order:
//!
//! 1. `Blur` at the deepest departing node (or at the shared ancestor when nothing departs),
//!    then `FocusOut` bubbling from there up to, but not including, the shared ancestor.
//! 2. `Focus` at the deepest arriving node (or at the shared ancestor), then `FocusIn`
//!    bubbling the same way.
//!
//! The shared ancestor is the deepest node on both the old and the new focus path.

use alloc::vec::Vec;

use focal_responder::event::{EventData, EventType};
use focal_responder::router::Router;
use focal_tree::NodeId;

use crate::boundary::{BoundaryId, PROPAGATION_LIMIT};
use crate::system::{Event, EventSystem};

impl EventSystem {
    /// Focus `target`, or its nearest focusable ancestor unless `exact` is set.
    ///
    /// A node is focusable when it is interactive and has a tab index (negative values
    /// included). When no focusable node is found the boundary is blurred.
    pub fn focus(&mut self, boundary: BoundaryId, target: Option<NodeId>, exact: bool) {
        let depth = if exact { 1 } else { PROPAGATION_LIMIT };
        let target = self.nearest_focusable(target, depth);
        self.set_active_element(boundary, target);
    }

    /// Clear the boundary's focus.
    pub fn blur(&mut self, boundary: BoundaryId) {
        self.set_active_element(boundary, None);
    }

    /// `target` if it is focusable, else its closest focusable ancestor.
    ///
    /// At most `max_depth` nodes are inspected, `target` included; `None` when the budget
    /// runs out first.
    pub fn nearest_focusable(&self, target: Option<NodeId>, max_depth: usize) -> Option<NodeId> {
        let mut target = target;
        let mut depth = max_depth;
        while let Some(node) = target {
            if self.is_focusable(node) {
                break;
            }
            depth = depth.saturating_sub(1);
            if depth == 0 {
                break;
            }
            target = self.tree.parent_of(node);
        }
        if depth > 0 { target } else { None }
    }

    /// Whether `node` can take focus: interactive with any tab index.
    pub fn is_focusable(&self, node: NodeId) -> bool {
        self.tree.tab_index(node).is_some() && self.tree.is_interactive(node)
    }

    /// Whether `node` is a keyboard navigation target: interactive with a tab index of
    /// zero or more.
    pub fn is_tabbable(&self, node: NodeId) -> bool {
        focal_focus::is_tabbable(&self.tree, node)
    }

    /// Replace the boundary's focused node without checking focusability.
    ///
    /// While the boundary is debouncing the value is recorded and applied when debouncing
    /// ends. Setting the current active element again does nothing. A target outside the
    /// boundary's root is ignored with a warning.
    pub fn set_active_element(&mut self, boundary: BoundaryId, value: Option<NodeId>) {
        let state = self.boundary_mut(boundary);
        if state.debounce_depth > 0 {
            state.pending = Some(value);
            return;
        }
        if state.active_element() == value {
            return;
        }

        let new_path = match value {
            Some(target) => match self.path_to(boundary, target) {
                Some(path) => path,
                None => {
                    log::warn!("{target:?} is not connected to the root of {boundary:?}, focus ignored");
                    return;
                }
            },
            None => Vec::new(),
        };
        log::debug!(
            "{boundary:?} focus {:?} -> {value:?}",
            self.boundary(boundary).active_element()
        );

        let old_path = core::mem::replace(&mut self.boundary_mut(boundary).focus_path, new_path.clone());
        let common = path_intersection(&old_path, &new_path);

        if !old_path.is_empty() {
            let departing = below(&old_path, common);
            self.dispatch_focus_event(boundary, EventType::Blur, departing.last().copied().or(common));
            self.dispatch_focus_bubbling_event(boundary, EventType::FocusOut, departing);
            if self.boundary(boundary).auto_blur {
                self.unhook_removal(boundary, departing);
            }
        }

        if !new_path.is_empty() {
            let arriving = below(&new_path, common);
            self.dispatch_focus_event(boundary, EventType::Focus, arriving.last().copied().or(common));
            self.dispatch_focus_bubbling_event(boundary, EventType::FocusIn, arriving);
            if self.boundary(boundary).auto_blur {
                self.hook_removal(boundary, arriving);
            }
        }
    }

    /// Whether the boundary blurs itself when a focused node is detached.
    pub fn auto_blur_disconnected_target(&self, boundary: BoundaryId) -> bool {
        self.boundary(boundary).auto_blur
    }

    /// Enable or disable blurring on detach.
    ///
    /// Enabling it while a node below the root of the focus path already has no parent
    /// blurs at once.
    pub fn set_auto_blur_disconnected_target(&mut self, boundary: BoundaryId, value: bool) {
        let state = self.boundary_mut(boundary);
        if state.auto_blur == value {
            return;
        }
        state.auto_blur = value;

        let path = state.focus_path.clone();
        if path.is_empty() {
            return;
        }
        if !value {
            self.unhook_removal(boundary, &path);
            return;
        }
        // The boundary root may legitimately be a tree root.
        for (i, &node) in path.iter().enumerate() {
            if i > 0 && self.tree.parent_of(node).is_none() {
                self.blur(boundary);
                return;
            }
            self.hook_removal(boundary, &[node]);
        }
    }

    fn path_to(&self, boundary: BoundaryId, target: NodeId) -> Option<Vec<NodeId>> {
        let root = self.root(boundary)?;
        Router::with_limit(&self.tree, PROPAGATION_LIMIT).propagation_path(target, Some(root))
    }

    fn focus_event(&self, boundary: BoundaryId, kind: EventType) -> Event {
        Event::new(kind, EventData::Focus)
            .with_time_stamp(self.boundary(boundary).time_stamp)
            .trusted()
    }

    fn dispatch_focus_event(&mut self, boundary: BoundaryId, kind: EventType, target: Option<NodeId>) {
        let Some(target) = target else {
            return;
        };
        let mut event = self.focus_event(boundary, kind);
        event.bubbles = false;
        self.notify_target(target, &mut event);
    }

    fn dispatch_focus_bubbling_event(&mut self, boundary: BoundaryId, kind: EventType, path: &[NodeId]) {
        if path.is_empty() {
            return;
        }
        let mut event = self.focus_event(boundary, kind);
        event.bubbles = true;
        self.dispatch_event(boundary, &mut event, path);
    }

    fn hook_removal(&mut self, boundary: BoundaryId, nodes: &[NodeId]) {
        for &node in nodes {
            let id = self.once(node, EventType::Removed, move |_, sys| sys.blur(boundary));
            if let Some(stale) = self.boundary_mut(boundary).removal_hooks.insert(node, id) {
                self.listeners.remove(stale);
            }
        }
    }

    fn unhook_removal(&mut self, boundary: BoundaryId, nodes: &[NodeId]) {
        for node in nodes {
            if let Some(id) = self.boundary_mut(boundary).removal_hooks.remove(node) {
                self.listeners.remove(id);
            }
        }
    }
}

/// Deepest node of `new` that also lies on `old`.
fn path_intersection(old: &[NodeId], new: &[NodeId]) -> Option<NodeId> {
    new.iter().rev().find(|n| old.contains(n)).copied()
}

/// The part of `path` strictly below `common` (all of it without a common node).
fn below(path: &[NodeId], common: Option<NodeId>) -> &[NodeId] {
    let start = common
        .and_then(|c| path.iter().position(|&n| n == c))
        .map_or(0, |i| i + 1);
    &path[start..]
}
