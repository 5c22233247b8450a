// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A nested boundary behind a host node, e.g. an embedded canvas or a popup surface.
//!
//! Tab walks into the nested scene through the host, through the nested scene's own
//! tab order, and back out into the outer scene. Focus inside the nested scene keeps the
//! host focused outside.
//!
//! Run:
//! - `RUST_LOG=focal_boundary=trace cargo run -p focal_demos --example nested_boundary`

use focal_boundary::{BindError, BoundaryOptions, Event, EventSystem};
use focal_responder::event::{EventType, KeyboardData, Modifiers};
use focal_tree::{LocalNode, NodeFlags, NodeId};

fn focusable(tab_index: i32) -> LocalNode {
    LocalNode {
        tab_index: Some(tab_index),
        flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
        ..LocalNode::default()
    }
}

fn main() -> Result<(), BindError> {
    env_logger::init();

    let mut sys = EventSystem::new();

    let stage = sys.insert(None, LocalNode::default());
    let toolbar = sys.insert(Some(stage), focusable(0));
    let host = sys.insert(Some(stage), focusable(0));
    let footer = sys.insert(Some(stage), focusable(0));
    let outer = sys.create_boundary(Some(stage), BoundaryOptions::default());

    let nested_stage = sys.insert(None, LocalNode::default());
    let first = sys.insert(Some(nested_stage), focusable(0));
    let second = sys.insert(Some(nested_stage), focusable(0));
    let inner = sys.create_boundary(Some(nested_stage), BoundaryOptions::default());

    sys.bind_nested_boundary(outer, inner, host)?;
    log::info!("bound {inner:?} behind {host:?}");

    let name = |n: Option<NodeId>| match n {
        Some(n) if n == toolbar => "toolbar",
        Some(n) if n == host => "host",
        Some(n) if n == footer => "footer",
        Some(n) if n == first => "nested first",
        Some(n) if n == second => "nested second",
        Some(_) => "?",
        None => "<none>",
    };

    let presses = [false, false, false, false, false, true, true, true];
    for shift in presses {
        let modifiers = if shift {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        let mut event = Event::keyboard(
            EventType::KeyDown,
            KeyboardData::new("Tab", "Tab").with_modifiers(modifiers),
        );
        sys.map_event(outer, &mut event);
        println!(
            "{:<9} outer: {:<8} inner: {}",
            if shift { "Shift+Tab" } else { "Tab" },
            name(sys.active_element(outer)),
            name(sys.active_element(inner)),
        );
    }

    sys.unbind_nested_boundary(outer, inner, host);
    Ok(())
}
