// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard and pointer focus on a small form.
//!
//! This example shows how to:
//! - build a scene with `focal_tree` nodes through an `EventSystem`,
//! - read the resolved tab order with `focal_focus`,
//! - drive focus with `Tab` / `Shift+Tab` and pointer presses,
//! - observe the `Blur` / `FocusOut` / `Focus` / `FocusIn` sequence.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p focal_demos --example tab_navigation`

use focal_boundary::{BoundaryOptions, Event, EventSystem};
use focal_responder::event::{EventType, KeyboardData, Modifiers, PointerData};
use focal_tree::{LocalNode, NodeFlags, NodeId};
use kurbo::{Point, Rect};

fn field(area: Rect, tab_index: i32) -> LocalNode {
    LocalNode {
        hit_area: Some(area),
        tab_index: Some(tab_index),
        flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
    }
}

fn tab(shift: bool) -> Event {
    let modifiers = if shift {
        Modifiers::SHIFT
    } else {
        Modifiers::empty()
    };
    Event::keyboard(
        EventType::KeyDown,
        KeyboardData::new("Tab", "Tab").with_modifiers(modifiers),
    )
}

fn main() {
    env_logger::init();

    let mut sys = EventSystem::new();
    let stage = sys.insert(None, LocalNode::default());
    let form = sys.insert(Some(stage), LocalNode::default());
    let name = sys.insert(Some(form), field(Rect::new(10.0, 10.0, 210.0, 40.0), 0));
    let email = sys.insert(Some(form), field(Rect::new(10.0, 50.0, 210.0, 80.0), 0));
    // Focusable by pointer, skipped by Tab.
    let notes = sys.insert(Some(form), field(Rect::new(10.0, 90.0, 210.0, 190.0), -1));
    let submit = sys.insert(Some(form), field(Rect::new(10.0, 200.0, 110.0, 230.0), 1));

    let labels = [
        (name, "name"),
        (email, "email"),
        (notes, "notes"),
        (submit, "submit"),
    ];
    let label = move |node: Option<NodeId>| {
        node.and_then(|n| labels.iter().find(|(id, _)| *id == n))
            .map_or("<none>", |(_, l)| *l)
    };

    for (node, text) in labels {
        for kind in [
            EventType::Blur,
            EventType::FocusOut,
            EventType::Focus,
            EventType::FocusIn,
        ] {
            sys.on(node, kind, move |ev, _| {
                println!("  {kind:?} on {text} (phase {:?})", ev.phase);
            });
        }
    }

    let boundary = sys.create_boundary(Some(stage), BoundaryOptions::default());

    let order = focal_focus::tab_order(sys.tree(), stage, |_| false);
    let names: Vec<_> = order.iter().map(|&n| label(Some(n))).collect();
    println!("Tab order: {names:?}");

    for shift in [false, false, false, false, true] {
        let mut event = tab(shift);
        sys.map_event(boundary, &mut event);
        println!(
            "{} -> {} (prevented: {})",
            if shift { "Shift+Tab" } else { "Tab" },
            label(sys.active_element(boundary)),
            event.default_prevented
        );
    }

    for point in [Point::new(50.0, 120.0), Point::new(400.0, 400.0)] {
        let mut event = Event::pointer(
            EventType::PointerDown,
            PointerData {
                pointer_id: 1,
                button: 0,
                global: point,
            },
        );
        sys.map_event(boundary, &mut event);
        println!(
            "PointerDown @ ({:.0}, {:.0}) -> {}",
            point.x,
            point.y,
            label(sys.active_element(boundary))
        );
    }
}
