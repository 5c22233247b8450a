// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use focal_tree::NodeId;

/// Failure to bind a nested boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The host already forwards to a nested boundary; unbind it first.
    #[error("host {0:?} is already bound to a nested boundary")]
    DuplicateBinding(NodeId),
}
