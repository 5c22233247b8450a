// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core routing types: phases, outcomes, dispatch steps, and parent lookup.

/// Propagation phase of a dispatch step, mirroring the DOM event phases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not being dispatched.
    #[default]
    None,
    /// Walking from the root toward the target.
    Capture,
    /// At the target itself.
    Target,
    /// Walking from the target's parent back to the root.
    Bubble,
}

/// Result of a handler: whether propagation continues.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Abort the remaining steps.
    Stop,
}

/// A single step of a responder sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node whose listeners run for this step.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// Capture step for `node`.
    pub const fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// Target step for `node`.
    pub const fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// Bubble step for `node`.
    pub const fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Source of parent links used to reconstruct root → target paths.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` for roots and unknown nodes.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, P: ParentLookup<K> + ?Sized> ParentLookup<K> for &P {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}
