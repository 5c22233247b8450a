// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing of focus changes made within one handling pass.

use crate::boundary::BoundaryId;
use crate::system::EventSystem;

impl EventSystem {
    /// Start recording focus changes instead of applying them.
    ///
    /// Calls nest; the outermost call clears whatever was recorded before.
    pub fn begin_debouncing(&mut self, boundary: BoundaryId) {
        let state = self.boundary_mut(boundary);
        state.debounce_depth += 1;
        if state.debounce_depth == 1 {
            state.pending = None;
        }
    }

    /// End a [`begin_debouncing`](Self::begin_debouncing) call.
    ///
    /// When the outermost call ends, the last recorded focus change (if any) is applied once.
    pub fn end_debouncing(&mut self, boundary: BoundaryId) {
        let state = self.boundary_mut(boundary);
        if state.debounce_depth == 0 {
            log::warn!("end_debouncing on {boundary:?} without matching begin_debouncing");
            return;
        }
        state.debounce_depth -= 1;
        if state.debounce_depth != 0 {
            return;
        }
        if let Some(value) = state.pending.take() {
            self.set_active_element(boundary, value);
        }
    }

    /// Whether focus changes on the boundary are currently being recorded.
    pub fn is_debouncing(&self, boundary: BoundaryId) -> bool {
        self.boundary(boundary).debounce_depth > 0
    }
}
