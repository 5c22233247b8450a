// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs root → target paths and emits dispatch steps.
//! Produces a capture → target → bubble sequence for a target path.
//!
//! ## Bounded ancestry
//!
//! Path reconstruction walks [`ParentLookup`] links and gives up after a fixed number of
//! hops, so malformed or cyclic parent chains produce `None` instead of looping.

use alloc::vec::Vec;

use crate::types::{Dispatch, ParentLookup, Phase};

/// Default hop limit for path reconstruction.
pub const DEFAULT_LIMIT: usize = 2048;

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] over a [`ParentLookup`], optionally with a custom
///   hop limit via [`Router::with_limit`].
/// - Call [`Router::propagation_path`] to get the root → target chain under a given root.
/// - Call [`Router::emit_path`] to turn a path into capture → target → bubble steps.
pub struct Router<K, P: ParentLookup<K>> {
    pub(crate) parent: P,
    pub(crate) limit: usize,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with the [default hop limit](DEFAULT_LIMIT).
    pub fn new(parent: P) -> Self {
        Self::with_limit(parent, DEFAULT_LIMIT)
    }

    /// Create a router with an explicit hop limit.
    pub fn with_limit(parent: P, limit: usize) -> Self {
        Self {
            parent,
            limit,
            _phantom: core::marker::PhantomData,
        }
    }

    /// The root → `target` path, ending at `root`.
    ///
    /// With `root == None` the path runs up to the topmost ancestor. Returns `None` if
    /// `root` is not an ancestor of `target` (or `target` itself), or if the chain is
    /// longer than the hop limit.
    pub fn propagation_path(&self, target: K, root: Option<K>) -> Option<Vec<K>> {
        let mut out = Vec::new();
        let mut cur = target;
        loop {
            if out.len() >= self.limit {
                return None;
            }
            out.push(cur);
            if Some(cur) == root {
                break;
            }
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None if root.is_none() => break,
                None => return None,
            }
        }
        out.reverse();
        Some(out)
    }

    /// Emit the responder sequence for a root → target `path`.
    ///
    /// Bubble steps are only emitted when `bubbles` is set.
    pub fn emit_path(&self, path: &[K], bubbles: bool) -> Vec<Dispatch<K>> {
        let mut out = Vec::new();
        // Split into ancestors and target. If path is empty, nothing to emit.
        let (target, ancestors) = match path.split_last() {
            Some((t, ancestors)) => (t, ancestors),
            None => return out,
        };

        // Capture: root→(excluding target)
        for &n in ancestors {
            out.push(Dispatch {
                phase: Phase::Capture,
                node: n,
            });
        }

        out.push(Dispatch::target(*target));

        if bubbles {
            // Bubble: parent→root (excluding target)
            for &n in ancestors.iter().rev() {
                out.push(Dispatch::bubble(n));
            }
        }
        out
    }

    /// Reconstruct the path to `target` and emit its responder sequence.
    pub fn dispatch_for(&self, target: K, root: Option<K>, bubbles: bool) -> Vec<Dispatch<K>> {
        self.propagation_path(target, root)
            .map(|path| self.emit_path(&path, bubbles))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    struct Node(u32);

    struct Parents;
    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    struct Cycle;
    impl ParentLookup<Node> for Cycle {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            Some(Node(node.0 ^ 1))
        }
    }

    #[test]
    fn parent_of_reconstructs_path() {
        let router = Router::new(Parents);
        assert_eq!(
            router.propagation_path(Node(3), None),
            Some(vec![Node(1), Node(2), Node(3)])
        );
        assert_eq!(
            router.propagation_path(Node(3), Some(Node(2))),
            Some(vec![Node(2), Node(3)])
        );
        assert_eq!(
            router.propagation_path(Node(1), Some(Node(1))),
            Some(vec![Node(1)])
        );
    }

    #[test]
    fn path_outside_root_is_none() {
        let router = Router::new(Parents);
        assert_eq!(router.propagation_path(Node(3), Some(Node(7))), None);
        assert_eq!(router.propagation_path(Node(1), Some(Node(2))), None);
    }

    #[test]
    fn cyclic_ancestry_is_bounded() {
        let router = Router::with_limit(Cycle, 16);
        assert_eq!(router.propagation_path(Node(0), None), None);
        assert_eq!(
            router.propagation_path(Node(0), Some(Node(1))),
            Some(vec![Node(1), Node(0)])
        );
    }

    #[test]
    fn simple_path_dispatch() {
        let router = Router::new(Parents);
        let out = router.dispatch_for(Node(3), None, true);
        let phases: Vec<(Phase, u32)> = out.iter().map(|d| (d.phase, d.node.0)).collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn non_bubbling_path_stops_at_target() {
        let router = Router::new(Parents);
        let out = router.emit_path(&[Node(1), Node(2)], false);
        assert_eq!(out, vec![Dispatch::capture(Node(1)), Dispatch::target(Node(2))]);
        assert!(router.emit_path(&[], true).is_empty());
    }
}
