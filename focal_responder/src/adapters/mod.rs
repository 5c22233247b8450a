// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Focal crates.
//!
//! Each adapter is gated behind a feature flag to keep the core responder lightweight.
//!
//! ## Available Adapters
//!
//! - [`tree`] (`tree_adapter` feature): [`ParentLookup`](crate::types::ParentLookup) over
//!   [`focal_tree::Tree`], so a [`Router`](crate::router::Router) can reconstruct paths
//!   straight from the scene tree.

#[cfg(feature = "tree_adapter")]
pub mod tree;
