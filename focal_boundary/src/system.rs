// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event system: scene, listeners, boundaries, and event delivery.

use alloc::rc::Rc;
use alloc::vec::Vec;

use focal_responder::dispatcher;
use focal_responder::event::{EventData, EventType, FederatedEvent};
use focal_responder::listeners::{ListenerId, ListenerPhase, Listeners};
use focal_responder::router::Router;
use focal_responder::types::{Dispatch, Outcome, Phase};
use focal_tree::{Hit, LocalNode, NodeFlags, NodeId, Tree};
use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::boundary::{Boundary, BoundaryId, BoundaryOptions, NESTING_LIMIT, PROPAGATION_LIMIT};
use crate::nested::NestedBinding;

/// Event type seen by listeners of an [`EventSystem`].
pub type Event = FederatedEvent<NodeId>;

/// Emitter a listener is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// A scene node.
    Node(NodeId),
    /// A boundary's own emitter, which sees every routed event the boundary dispatched.
    Boundary(BoundaryId),
}

/// Owns the scene tree, every boundary, their listeners, and the nested bindings.
///
/// Listeners receive `&mut EventSystem`, so they may focus nodes, mutate the scene, or
/// map further events while a dispatch is in progress. All such calls run to completion
/// on the same call stack.
pub struct EventSystem {
    pub(crate) tree: Tree,
    pub(crate) listeners: Listeners<ListenerTarget, NodeId, Self>,
    pub(crate) boundaries: Vec<Boundary>,
    pub(crate) bindings: HashMap<NodeId, NestedBinding>,
    pub(crate) nesting: u32,
}

impl core::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventSystem")
            .field("tree", &self.tree)
            .field("listeners", &self.listeners)
            .field("boundaries", &self.boundaries.len())
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSystem {
    /// Create a system over an empty tree.
    pub fn new() -> Self {
        Self::with_tree(Tree::new())
    }

    /// Create a system over an existing tree.
    pub fn with_tree(tree: Tree) -> Self {
        Self {
            tree,
            listeners: Listeners::new(),
            boundaries: Vec::new(),
            bindings: HashMap::new(),
            nesting: 0,
        }
    }

    /// Read access to the scene.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    // --- scene ---

    /// Insert a node as the last child of `parent`, or as a new root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        self.tree.insert(parent, local)
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// If `child` already had a parent it is detached first, and `Removed` is emitted on it.
    /// Returns `false` without changes for stale ids or when `parent` lies inside `child`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.tree.is_alive(parent)
            || !self.tree.is_alive(child)
            || self.is_ancestor(child, parent)
        {
            return false;
        }
        if self.tree.detach(child).is_some() {
            self.emit_removed(child);
        }
        self.tree.reparent(child, Some(parent))
    }

    /// Detach `child` from its parent, keeping it alive. Emits `Removed` on it.
    pub fn remove_child(&mut self, child: NodeId) -> bool {
        if self.tree.detach(child).is_none() {
            return false;
        }
        self.emit_removed(child);
        true
    }

    /// Destroy `node` and its subtree.
    ///
    /// `Removed` is emitted on `node` first. Listeners of every freed node are dropped, and
    /// so are nested bindings hosted by them.
    pub fn remove(&mut self, node: NodeId) {
        if !self.tree.is_alive(node) {
            return;
        }
        self.tree.detach(node);
        self.emit_removed(node);
        for id in self.tree.remove(node) {
            self.listeners.remove_target(ListenerTarget::Node(id));
            if let Some(binding) = self.bindings.remove(&id) {
                binding.release(&mut self.listeners);
            }
        }
    }

    /// Set a node's tab index.
    pub fn set_tab_index(&mut self, node: NodeId, tab_index: Option<i32>) {
        self.tree.set_tab_index(node, tab_index);
    }

    /// Toggle [`NodeFlags::INTERACTIVE`] on a node.
    pub fn set_interactive(&mut self, node: NodeId, interactive: bool) {
        self.set_flag(node, NodeFlags::INTERACTIVE, interactive);
    }

    /// Toggle [`NodeFlags::INTERACTIVE_CHILDREN`] on a node.
    pub fn set_interactive_children(&mut self, node: NodeId, interactive_children: bool) {
        self.set_flag(node, NodeFlags::INTERACTIVE_CHILDREN, interactive_children);
    }

    /// Toggle [`NodeFlags::VISIBLE`] on a node.
    pub fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.set_flag(node, NodeFlags::VISIBLE, visible);
    }

    /// Set a node's hit area.
    pub fn set_hit_area(&mut self, node: NodeId, hit_area: Option<Rect>) {
        self.tree.set_hit_area(node, hit_area);
    }

    fn set_flag(&mut self, node: NodeId, flag: NodeFlags, on: bool) {
        if let Some(mut flags) = self.tree.flags(node) {
            flags.set(flag, on);
            self.tree.set_flags(node, flags);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut hops = 0;
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            hops += 1;
            if hops > PROPAGATION_LIMIT {
                return false;
            }
            current = self.tree.parent_of(n);
        }
        false
    }

    // --- listeners ---

    /// Listen for `kind` on `node` (target and bubble phases).
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventType,
        listener: impl Fn(&mut Event, &mut Self) + 'static,
    ) -> ListenerId {
        self.add_listener(ListenerTarget::Node(node), kind, ListenerPhase::Bubble, false, listener)
    }

    /// Listen for `kind` on `node` in the capture phase (and at the target, before bubble
    /// listeners).
    pub fn on_capture(
        &mut self,
        node: NodeId,
        kind: EventType,
        listener: impl Fn(&mut Event, &mut Self) + 'static,
    ) -> ListenerId {
        self.add_listener(ListenerTarget::Node(node), kind, ListenerPhase::Capture, false, listener)
    }

    /// Listen for the next `kind` on `node` only.
    pub fn once(
        &mut self,
        node: NodeId,
        kind: EventType,
        listener: impl Fn(&mut Event, &mut Self) + 'static,
    ) -> ListenerId {
        self.add_listener(ListenerTarget::Node(node), kind, ListenerPhase::Bubble, true, listener)
    }

    /// Listen for `kind` on a boundary's own emitter.
    ///
    /// Every routed event the boundary dispatches (pointer, keyboard, `FocusIn`, `FocusOut`)
    /// is emitted there once propagation through the scene is done. `Focus` and `Blur`
    /// are not.
    pub fn on_boundary(
        &mut self,
        boundary: BoundaryId,
        kind: EventType,
        listener: impl Fn(&mut Event, &mut Self) + 'static,
    ) -> ListenerId {
        self.add_listener(
            ListenerTarget::Boundary(boundary),
            kind,
            ListenerPhase::Bubble,
            false,
            listener,
        )
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub(crate) fn add_listener(
        &mut self,
        target: ListenerTarget,
        kind: EventType,
        phase: ListenerPhase,
        once: bool,
        listener: impl Fn(&mut Event, &mut Self) + 'static,
    ) -> ListenerId {
        self.listeners.add(target, kind, phase, once, Rc::new(listener))
    }

    // --- boundaries ---

    /// Create a boundary rooted at `root`.
    pub fn create_boundary(&mut self, root: Option<NodeId>, options: BoundaryOptions) -> BoundaryId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "BoundaryId uses 32-bit indices by design."
        )]
        let id = BoundaryId(self.boundaries.len() as u32);
        self.boundaries.push(Boundary::new(root, options));
        id
    }

    /// Re-point a boundary at another root.
    ///
    /// The focus path is kept as is; it is recomputed from the new root on the next focus change.
    pub fn set_root(&mut self, boundary: BoundaryId, root: Option<NodeId>) {
        self.boundary_mut(boundary).root = root;
    }

    /// Root of a boundary.
    pub fn root(&self, boundary: BoundaryId) -> Option<NodeId> {
        self.boundary(boundary).root
    }

    /// The focused node of a boundary.
    pub fn active_element(&self, boundary: BoundaryId) -> Option<NodeId> {
        self.boundary(boundary).active_element()
    }

    /// Root → active element path of a boundary; empty when nothing is focused.
    pub fn focus_path(&self, boundary: BoundaryId) -> &[NodeId] {
        &self.boundary(boundary).focus_path
    }

    /// Hit test the boundary's subtree.
    pub fn hit_test(&self, boundary: BoundaryId, point: Point) -> Option<Hit> {
        let root = self.root(boundary)?;
        self.tree.hit_test(root, point)
    }

    /// Keyboard navigation order of the boundary's subtree.
    ///
    /// With `include_hosts`, hosts of nested boundaries are listed too, even when they are
    /// not tabbable themselves.
    pub fn tab_order(&self, boundary: BoundaryId, include_hosts: bool) -> Vec<NodeId> {
        let Some(root) = self.root(boundary) else {
            return Vec::new();
        };
        focal_focus::tab_order(&self.tree, root, |n| {
            include_hosts && self.bindings.contains_key(&n)
        })
    }

    /// Route an incoming event through a boundary.
    ///
    /// `PointerDown` focuses the hit node (or its nearest focusable ancestor) unless a
    /// listener prevented the event or requested focus itself. `PointerUp` and
    /// `PointerMove` are dispatched along the hit path. `KeyDown` and `KeyUp` are dispatched
    /// along the focus path, and `KeyDown` of `Tab` moves focus.
    ///
    /// Other kinds and payloads that do not match the kind are ignored with a warning.
    pub fn map_event(&mut self, boundary: BoundaryId, from: &mut Event) {
        if self.nesting >= NESTING_LIMIT {
            log::warn!("event mapping nested deeper than {NESTING_LIMIT} levels, dropping {:?}", from.kind);
            return;
        }
        self.nesting += 1;
        self.boundary_mut(boundary).time_stamp = from.time_stamp;
        match from.kind {
            EventType::PointerDown => self.map_pointer_down(boundary, from),
            EventType::PointerUp | EventType::PointerMove => self.map_pointer(boundary, from),
            EventType::KeyDown | EventType::KeyUp => self.map_key(boundary, from),
            other => log::warn!("boundary has no mapping for {other:?} events"),
        }
        self.nesting -= 1;
    }

    pub(crate) fn boundary(&self, id: BoundaryId) -> &Boundary {
        self.boundaries.get(id.idx()).expect("unknown BoundaryId")
    }

    pub(crate) fn boundary_mut(&mut self, id: BoundaryId) -> &mut Boundary {
        self.boundaries.get_mut(id.idx()).expect("unknown BoundaryId")
    }

    // --- delivery ---

    /// Dispatch a copy of `from` along `path` and carry prevention back to `from`.
    pub(crate) fn dispatch_copy(&mut self, boundary: BoundaryId, from: &mut Event, path: &[NodeId]) {
        if path.is_empty() {
            return;
        }
        let mut event = from.fork();
        self.dispatch_event(boundary, &mut event, path);
        if event.default_prevented {
            from.default_prevented = true;
        }
    }

    /// Propagate `event` along `path` (capture → target → bubble), then emit it on the
    /// boundary's own emitter.
    pub(crate) fn dispatch_event(&mut self, boundary: BoundaryId, event: &mut Event, path: &[NodeId]) {
        let Some(&target) = path.last() else {
            return;
        };
        event.target = Some(target);
        event.path = path.iter().copied().collect();
        event.propagation_stopped = false;
        event.propagation_immediately_stopped = false;

        let seq = Router::new(&self.tree).emit_path(path, event.bubbles);
        dispatcher::run(&seq, event, |step, event| self.notify_step(step, event));

        event.phase = Phase::None;
        event.current_target = None;
        let scheduled = self.listeners.snapshot(
            ListenerTarget::Boundary(boundary),
            event.kind,
            ListenerPhase::Bubble,
        );
        for listener in scheduled {
            if self.listeners.claim(&listener) {
                (listener.callback)(event, self);
            }
        }
    }

    fn notify_step(&mut self, step: &Dispatch<NodeId>, event: &mut Event) -> Outcome {
        event.phase = step.phase;
        if self.tree.is_interactive(step.node) {
            match step.phase {
                Phase::Capture => self.notify(step.node, event, ListenerPhase::Capture),
                Phase::Bubble => self.notify(step.node, event, ListenerPhase::Bubble),
                Phase::Target | Phase::None => {
                    self.notify(step.node, event, ListenerPhase::Capture);
                    self.notify(step.node, event, ListenerPhase::Bubble);
                }
            }
        }
        if event.propagation_stopped {
            Outcome::Stop
        } else {
            Outcome::Continue
        }
    }

    /// Deliver `event` to the target only, both listener phases, if it is interactive.
    pub(crate) fn notify_target(&mut self, node: NodeId, event: &mut Event) {
        event.target = Some(node);
        event.path.clear();
        event.path.push(node);
        event.phase = Phase::Target;
        if self.tree.is_interactive(node) {
            self.notify(node, event, ListenerPhase::Capture);
            self.notify(node, event, ListenerPhase::Bubble);
        }
    }

    fn notify(&mut self, node: NodeId, event: &mut Event, phase: ListenerPhase) {
        let scheduled = self
            .listeners
            .snapshot(ListenerTarget::Node(node), event.kind, phase);
        for listener in scheduled {
            if event.propagation_immediately_stopped {
                break;
            }
            if !self.listeners.claim(&listener) {
                continue;
            }
            event.current_target = Some(node);
            (listener.callback)(event, self);
        }
    }

    fn emit_removed(&mut self, node: NodeId) {
        let mut event = Event::new(EventType::Removed, EventData::None);
        event.target = Some(node);
        event.path.push(node);
        event.phase = Phase::Target;
        self.notify(node, &mut event, ListenerPhase::Capture);
        self.notify(node, &mut event, ListenerPhase::Bubble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::RefCell;

    fn interactive() -> LocalNode {
        LocalNode {
            flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
            ..LocalNode::default()
        }
    }

    #[test]
    fn routed_events_skip_non_interactive_nodes() {
        let mut sys = EventSystem::new();
        let stage = sys.insert(None, LocalNode::default());
        let outer = sys.insert(Some(stage), interactive());
        let plain = sys.insert(Some(outer), LocalNode::default());
        let leaf = sys.insert(Some(plain), interactive());
        let b = sys.create_boundary(Some(stage), BoundaryOptions::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        for (node, name) in [(outer, "outer"), (plain, "plain"), (leaf, "leaf")] {
            let capture_log = log.clone();
            sys.on_capture(node, EventType::KeyDown, move |ev, _| {
                capture_log.borrow_mut().push((name, ev.phase));
            });
            let bubble_log = log.clone();
            sys.on(node, EventType::KeyDown, move |ev, _| {
                bubble_log.borrow_mut().push((name, ev.phase));
            });
        }

        let mut ev = Event::new(EventType::KeyDown, EventData::None);
        sys.dispatch_event(b, &mut ev, &[stage, outer, plain, leaf]);
        assert_eq!(
            *log.borrow(),
            vec![
                ("outer", Phase::Capture),
                ("leaf", Phase::Target),
                ("leaf", Phase::Target),
                ("outer", Phase::Bubble),
            ]
        );
    }

    #[test]
    fn stop_propagation_and_prevention_reach_the_incoming_event() {
        let mut sys = EventSystem::new();
        let root = sys.insert(None, interactive());
        let leaf = sys.insert(Some(root), interactive());
        let b = sys.create_boundary(Some(root), BoundaryOptions::default());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        sys.on(leaf, EventType::KeyUp, move |ev, _| {
            s.borrow_mut().push("first");
            ev.prevent_default();
            ev.stop_immediate_propagation();
        });
        let s = seen.clone();
        sys.on(leaf, EventType::KeyUp, move |_, _| s.borrow_mut().push("second"));
        let s = seen.clone();
        sys.on(root, EventType::KeyUp, move |_, _| s.borrow_mut().push("root"));
        let s = seen.clone();
        sys.on_boundary(b, EventType::KeyUp, move |_, _| s.borrow_mut().push("boundary"));

        let mut from = Event::new(EventType::KeyUp, EventData::None);
        sys.dispatch_copy(b, &mut from, &[root, leaf]);
        assert!(from.default_prevented);
        assert_eq!(*seen.borrow(), vec!["first", "boundary"]);
    }

    #[test]
    fn reparenting_emits_removed_and_refuses_cycles() {
        let mut sys = EventSystem::new();
        let a = sys.insert(None, LocalNode::default());
        let b = sys.insert(None, LocalNode::default());
        let child = sys.insert(Some(a), LocalNode::default());

        let removed = Rc::new(RefCell::new(0));
        let r = removed.clone();
        sys.on(child, EventType::Removed, move |ev, sys| {
            assert_eq!(sys.tree().parent_of(child), None, "detached before notification");
            assert_eq!(ev.target, Some(child));
            *r.borrow_mut() += 1;
        });

        assert!(sys.add_child(b, child));
        assert_eq!(sys.tree().parent_of(child), Some(b));
        assert_eq!(*removed.borrow(), 1);

        assert!(!sys.add_child(child, b), "b is an ancestor of child");
        assert!(sys.remove_child(child));
        assert!(!sys.remove_child(child));
        assert_eq!(*removed.borrow(), 2);
    }

    #[test]
    fn once_listener_survives_an_immediate_stop() {
        let mut sys = EventSystem::new();
        let root = sys.insert(None, LocalNode::default());
        let child = sys.insert(Some(root), LocalNode::default());

        let stop = sys.on(child, EventType::Removed, |ev, _| ev.stop_immediate_propagation());
        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        sys.once(child, EventType::Removed, move |_, _| *f.borrow_mut() += 1);

        assert!(sys.remove_child(child));
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(sys.listeners.len(), 2, "the skipped once listener stays armed");

        sys.off(stop);
        assert!(sys.add_child(root, child));
        assert!(sys.remove_child(child));
        assert!(sys.add_child(root, child));
        assert!(sys.remove_child(child));
        assert_eq!(*fired.borrow(), 1);
        assert!(sys.listeners.is_empty());
    }

    #[test]
    fn remove_drops_listeners_of_freed_nodes() {
        let mut sys = EventSystem::new();
        let root = sys.insert(None, LocalNode::default());
        let leaf = sys.insert(Some(root), interactive());
        sys.on(leaf, EventType::Focus, |_, _| {});
        sys.on(root, EventType::Focus, |_, _| {});
        sys.remove(root);
        assert!(sys.listeners.is_empty());
        assert!(!sys.tree().is_alive(leaf));
    }

    #[test]
    fn unmapped_kinds_are_ignored() {
        let mut sys = EventSystem::new();
        let root = sys.insert(None, interactive());
        let b = sys.create_boundary(Some(root), BoundaryOptions::default());
        let mut ev = Event::new(EventType::Removed, EventData::None);
        sys.map_event(b, &mut ev);
        assert!(!ev.default_prevented);
        assert_eq!(sys.nesting, 0);
    }
}
