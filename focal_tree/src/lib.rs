// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal Tree: a small Kurbo-native scene tree for interaction.
//!
//! Focal Tree holds the hierarchy that input is routed through.
//!
//! - Arena storage with generational [`NodeId`]s, so stale handles are detected instead of aliasing.
//! - Per-node tab index, hit area, and interaction flags.
//! - Point hit testing that returns the hit node together with its path from a chosen root.
//!
//! ## Not a layout or render tree
//!
//! Positions are supplied by the owner as surface-space hit areas. There are no transforms,
//! clips, or z-order beyond sibling order: later children are on top of earlier ones.
//!
//! ## API overview
//!
//! - [`Tree`]: the node arena.
//! - [`LocalNode`]: per-node data (hit area, tab index, flags).
//! - [`NodeFlags`]: visibility and interactivity controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`Hit`]: result of [`Tree::hit_test`].
//!
//! Key operations:
//! - [`Tree::insert`], [`Tree::remove`], [`Tree::detach`], [`Tree::reparent`]
//! - [`Tree::parent_of`], [`Tree::children_of`], [`Tree::root_of`]
//! - [`Tree::set_tab_index`], [`Tree::set_flags`], [`Tree::set_hit_area`]
//! - [`Tree::hit_test`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, Tree};
pub use types::{LocalNode, NodeFlags, NodeId};
