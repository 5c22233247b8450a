// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal Boundary: focus tracking, Tab navigation, and nested routing contexts.
//!
//! ## Overview
//!
//! An [`EventSystem`] owns a `focal_tree` scene, the listeners attached to it, and any
//! number of boundaries. A boundary is a routing context rooted at one node: it keeps a
//! focus path (root → active element), turns raw pointer and keyboard input into routed
//! events, and fires DOM-like `Blur` / `FocusOut` / `Focus` / `FocusIn` transitions
//! whenever its focus changes.
//!
//! - **Focus**: [`focus`](EventSystem::focus) picks the nearest focusable node (interactive,
//!   any tab index), [`blur`](EventSystem::blur) clears it. Detaching a focused node
//!   blurs the boundary unless [`BoundaryOptions`] says otherwise.
//! - **Pointer**: `PointerDown` focuses the hit node's nearest focusable ancestor unless a
//!   listener prevented the event or chose focus itself.
//! - **Keyboard**: key events travel along the focus path; `Tab` / `Shift+Tab` walk the
//!   tab order (`focal_focus`) when no listener prevents them.
//! - **Debouncing**: focus changes made while handling one input event are coalesced and
//!   applied once.
//! - **Nesting**: [`bind_nested_boundary`](EventSystem::bind_nested_boundary) places a
//!   child boundary behind a host node; input, focus, and Tab navigation cross the seam
//!   both ways.
//!
//! ## Example
//!
//! ```
//! use focal_boundary::{BoundaryOptions, Event, EventSystem};
//! use focal_responder::event::{EventType, KeyboardData};
//! use focal_tree::{LocalNode, NodeFlags};
//!
//! let button = LocalNode {
//!     tab_index: Some(0),
//!     flags: NodeFlags::default() | NodeFlags::INTERACTIVE,
//!     ..LocalNode::default()
//! };
//!
//! let mut sys = EventSystem::new();
//! let stage = sys.insert(None, LocalNode::default());
//! let ok = sys.insert(Some(stage), button.clone());
//! let cancel = sys.insert(Some(stage), button);
//! let boundary = sys.create_boundary(Some(stage), BoundaryOptions::default());
//!
//! let mut tab = Event::keyboard(EventType::KeyDown, KeyboardData::new("Tab", "Tab"));
//! sys.map_event(boundary, &mut tab);
//! assert_eq!(sys.active_element(boundary), Some(ok));
//! assert!(tab.default_prevented);
//!
//! let mut tab = Event::keyboard(EventType::KeyDown, KeyboardData::new("Tab", "Tab"));
//! sys.map_event(boundary, &mut tab);
//! assert_eq!(sys.active_element(boundary), Some(cancel));
//! ```
//!
//! Listeners receive `&mut EventSystem` and may focus, mutate the scene, or map more
//! events re-entrantly. Re-entrant [`map_event`](EventSystem::map_event) calls are cut
//! off after [`NESTING_LIMIT`] levels.
//!
//! This crate is `no_std` and uses `alloc`. It emits diagnostics through `log`; install a
//! logger in the binary to see them.

#![no_std]

extern crate alloc;

mod boundary;
mod debounce;
mod error;
mod keyboard;
mod nested;
mod pointer;
mod system;
mod transition;


pub use boundary::{BoundaryId, BoundaryOptions, NESTING_LIMIT, PROPAGATION_LIMIT};
pub use error::BindError;
pub use focal_responder::listeners::ListenerId;
pub use nested::FORWARDED_EVENTS;
pub use system::{Event, EventSystem, ListenerTarget};
