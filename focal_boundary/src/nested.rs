// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested boundaries: a child routing context behind a host node.
//!
//! From the parent's point of view the host is one focusable unit. Pointer and keyboard
//! events reaching the host are mapped by the child boundary; focus entering the child's
//! root focuses the host in the parent; focus leaving it blurs the parent; and the host
//! losing focus blurs the child.

use focal_responder::event::EventType;
use focal_responder::listeners::{ListenerId, Listeners};
use focal_tree::NodeId;
use smallvec::SmallVec;

use crate::boundary::BoundaryId;
use crate::error::BindError;
use crate::system::{EventSystem, ListenerTarget};

/// Event kinds forwarded from a host to its nested boundary.
pub const FORWARDED_EVENTS: [EventType; 5] = [
    EventType::PointerDown,
    EventType::PointerUp,
    EventType::PointerMove,
    EventType::KeyDown,
    EventType::KeyUp,
];

#[derive(Debug)]
pub(crate) struct NestedBinding {
    pub(crate) parent: BoundaryId,
    pub(crate) child: BoundaryId,
    listeners: SmallVec<[ListenerId; 8]>,
}

impl NestedBinding {
    /// Remove every listener the binding installed.
    pub(crate) fn release(self, listeners: &mut Listeners<ListenerTarget, NodeId, EventSystem>) {
        for id in self.listeners {
            listeners.remove(id);
        }
    }
}

impl EventSystem {
    /// Bind `child` behind `host`, a node of `parent`.
    ///
    /// A non-interactive host is made interactive, with a warning.
    ///
    /// # Errors
    ///
    /// [`BindError::DuplicateBinding`] if `host` is already bound.
    pub fn bind_nested_boundary(
        &mut self,
        parent: BoundaryId,
        child: BoundaryId,
        host: NodeId,
    ) -> Result<(), BindError> {
        if self.bindings.contains_key(&host) {
            return Err(BindError::DuplicateBinding(host));
        }
        if !self.tree.is_interactive(host) {
            log::warn!("nested boundary host {host:?} must be interactive, making it interactive");
            self.set_interactive(host, true);
        }

        let mut listeners = SmallVec::new();
        for kind in FORWARDED_EVENTS {
            listeners.push(self.on(host, kind, move |ev, sys| sys.map_event(child, ev)));
        }

        listeners.push(self.on_boundary(child, EventType::FocusIn, move |ev, sys| {
            if sys.root(child).is_some_and(|root| ev.path.first() == Some(&root)) {
                sys.set_active_element(parent, Some(host));
            }
        }));
        listeners.push(self.on_boundary(child, EventType::FocusOut, move |ev, sys| {
            if sys.root(child).is_some_and(|root| ev.path.first() == Some(&root))
                && sys.active_element(parent) == Some(host)
            {
                sys.blur(parent);
            }
        }));

        // Runs after listeners registered on the host before binding.
        listeners.push(self.on(host, EventType::Blur, move |_, sys| sys.blur(child)));

        log::debug!("bound {child:?} behind {host:?} in {parent:?}");
        self.bindings.insert(
            host,
            NestedBinding {
                parent,
                child,
                listeners,
            },
        );
        Ok(())
    }

    /// Undo [`bind_nested_boundary`](Self::bind_nested_boundary).
    ///
    /// Unbinding a host without a binding does nothing. A binding to a different pair of
    /// boundaries is left in place with a warning.
    pub fn unbind_nested_boundary(&mut self, parent: BoundaryId, child: BoundaryId, host: NodeId) {
        let Some(binding) = self.bindings.get(&host) else {
            return;
        };
        if binding.parent != parent || binding.child != child {
            log::warn!(
                "{host:?} is bound to {:?} in {:?}, not {child:?} in {parent:?}",
                binding.child,
                binding.parent
            );
            return;
        }
        if let Some(binding) = self.bindings.remove(&host) {
            binding.release(&mut self.listeners);
        }
    }

    /// The boundary bound behind `host`, if any.
    pub fn nested_boundary_of(&self, host: NodeId) -> Option<BoundaryId> {
        self.bindings.get(&host).map(|b| b.child)
    }
}
