// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal Responder: a deterministic, `no_std` event model and router for UI events.
//!
//! ## Overview
//!
//! This crate defines the event shape listeners see and the capture → target → bubble order
//! events travel in. It does not perform hit testing and it does not own a scene; the
//! dispatching context (see `focal_boundary`) supplies the target and drives delivery.
//!
//! ## Events
//!
//! [`FederatedEvent`](event::FederatedEvent) carries the DOM-like routing fields (`target`,
//! `current_target`, `path`, `phase`, `bubbles`), the cooperative cancellation flags
//! (`default_prevented`, `propagation_stopped`), `time_stamp`, `is_trusted`, and a
//! category payload ([`EventData`](event::EventData)): pointer position and button, or
//! keyboard key, code, modifiers, repeat, composition state and location.
//!
//! ## Routing
//!
//! [`Router`](router::Router) rebuilds the root → target path through a
//! [`ParentLookup`](types::ParentLookup) with a hop limit, and emits the
//! [`Dispatch`](types::Dispatch) steps for it. Non-bubbling events (focus, blur) stop at
//! the target.
//!
//! ## Dispatcher
//!
//! Execute handlers over the responder sequence and honor stop outcomes with [`dispatcher::run`].
//!
//! ```
//! use focal_responder::dispatcher;
//! use focal_responder::router::Router;
//! use focal_responder::types::{Outcome, ParentLookup, Phase};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let router = Router::new(Parents);
//! let seq = router.dispatch_for(3, None, true);
//! let mut default_prevented = false;
//! let stop_at = dispatcher::run(&seq, &mut default_prevented, |d, flag| {
//!     if matches!(d.phase, Phase::Target) {
//!         *flag = true;
//!     }
//!     Outcome::Continue
//! });
//! assert!(stop_at.is_none());
//! assert!(default_prevented);
//! assert_eq!(seq.len(), 5);
//! ```
//!
//! ## Listeners
//!
//! [`Listeners`](listeners::Listeners) is the `on` / `off` / `once` registry. Callbacks get
//! mutable access to a context type of your choosing, which lets them re-enter dispatch.
//!
//! ## Adapters
//!
//! - **Tree Adapter** (`tree_adapter` feature): [`ParentLookup`](types::ParentLookup) for
//!   `focal_tree::Tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod event;
pub mod listeners;
pub mod router;
pub mod types;
