// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer mapping and pointer-driven focus.

use crate::boundary::BoundaryId;
use crate::system::{Event, EventSystem};

impl EventSystem {
    pub(crate) fn map_pointer_down(&mut self, boundary: BoundaryId, from: &mut Event) {
        let Some(point) = from.pointer_data().map(|p| p.global) else {
            log::warn!("{boundary:?} cannot map a non-pointer event as a pointer event");
            return;
        };

        self.begin_debouncing(boundary);

        if let Some(hit) = self.hit_test(boundary, point) {
            self.dispatch_copy(boundary, from, &hit.path);
        }

        // A recorded blur does not count as a decision; a recorded target does.
        let decided = matches!(self.boundary(boundary).pending, Some(Some(_)));
        if !decided && !from.default_prevented {
            // Listeners may have changed the scene under the pointer.
            let target = self.hit_test(boundary, point).map(|h| h.node);
            self.focus(boundary, target, false);
        }

        self.end_debouncing(boundary);
    }

    pub(crate) fn map_pointer(&mut self, boundary: BoundaryId, from: &mut Event) {
        let Some(point) = from.pointer_data().map(|p| p.global) else {
            log::warn!("{boundary:?} cannot map a non-pointer event as a pointer event");
            return;
        };
        if let Some(hit) = self.hit_test(boundary, point) {
            self.dispatch_copy(boundary, from, &hit.path);
        }
    }
}
