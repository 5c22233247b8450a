// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard mapping and Tab navigation.

use focal_focus::{Navigation, step_from};
use focal_responder::event::EventType;
use focal_tree::NodeId;

use crate::boundary::BoundaryId;
use crate::system::{Event, EventSystem};

impl EventSystem {
    pub(crate) fn map_key(&mut self, boundary: BoundaryId, from: &mut Event) {
        let Some(data) = from.keyboard_data() else {
            log::warn!("{boundary:?} cannot map a non-keyboard event as a keyboard event");
            return;
        };
        let is_tab_navigation = from.kind == EventType::KeyDown && data.code == "Tab";
        if !is_tab_navigation {
            self.dispatch_keyboard_event(boundary, from);
            return;
        }

        let active = self.active_element(boundary);
        let nested_active = active
            .and_then(|host| self.nested_boundary_of(host))
            .map(|nested| self.active_element(nested));

        self.begin_debouncing(boundary);
        self.navigate_tab(boundary, from, active, nested_active);
        self.end_debouncing(boundary);
    }

    /// Body of Tab handling; runs between `begin_debouncing` and `end_debouncing`.
    ///
    /// `nested_active` is `None` when `active` hosts no nested boundary, and `Some(None)`
    /// when it does but nothing is focused in there.
    fn navigate_tab(
        &mut self,
        boundary: BoundaryId,
        from: &mut Event,
        active: Option<NodeId>,
        nested_active: Option<Option<NodeId>>,
    ) {
        let backward = from.shift_key();
        let active_tabbable = active.is_some_and(|a| self.is_tabbable(a));

        // Keeps an unfocused nested boundary from taking the same Shift+Tab back in,
        // which would cycle forever. A listener that records a focus change keeps it.
        let fake_prevented = backward && nested_active == Some(None) && active_tabbable;
        if fake_prevented {
            from.default_prevented = true;
        }

        self.dispatch_keyboard_event(boundary, from);

        if fake_prevented && self.boundary(boundary).pending.is_none() {
            from.default_prevented = false;
        }
        if from.default_prevented {
            return;
        }

        if backward && matches!(nested_active, Some(Some(_))) && active_tabbable {
            // Hand control back to the nested boundary for its own backward walk.
            self.set_active_element(boundary, active);
            from.prevent_default();
            return;
        }

        let direction = Navigation::from_shift(backward);
        let order = self.tab_order(boundary, true);
        let mut target = active;
        loop {
            target = step_from(&order, target, direction);
            let Some(candidate) = target else {
                break;
            };
            let Some(nested) = self.nested_boundary_of(candidate) else {
                break;
            };
            let tabbable = self.is_tabbable(candidate);
            if !backward && tabbable {
                break;
            }
            log::trace!("{boundary:?} forwards Tab into {nested:?} through {candidate:?}");
            self.map_event(nested, from);
            if from.default_prevented {
                return;
            }
            if backward && tabbable {
                break;
            }
        }

        log::trace!("{boundary:?} Tab {direction:?} -> {target:?}");
        self.set_active_element(boundary, target);
        if target.is_some() {
            from.prevent_default();
        }
    }

    /// Dispatch a copy of `from` along the focus path.
    fn dispatch_keyboard_event(&mut self, boundary: BoundaryId, from: &mut Event) {
        let path = self.focus_path(boundary).to_vec();
        self.dispatch_copy(boundary, from, &path);
    }
}
