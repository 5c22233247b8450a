// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Focal crates.
//!
//! - [`tree`] (`tree_adapter` feature): [`TabTree`](crate::TabTree) for `focal_tree::Tree`.

#[cfg(feature = "tree_adapter")]
pub mod tree;
