// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a responder sequence and honor stop outcomes.
//!
//! [`run`] visits each [`Dispatch`] step in order and hands it to your handler together
//! with the event. [`Outcome::Stop`] ends the walk at that step. Everything else
//! (prevention, immediate stops inside a node's listener list) lives on the event.
//!
//! ## Example
//!
//! ```
//! use focal_responder::dispatcher;
//! use focal_responder::types::{Dispatch, Outcome, Phase};
//!
//! let seq = vec![
//!     Dispatch::capture(1_u32),
//!     Dispatch::target(2),
//!     Dispatch::bubble(1),
//! ];
//!
//! let mut seen = Vec::new();
//! let stop_at = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push((d.phase, d.node));
//!     if d.phase == Phase::Target { Outcome::Stop } else { Outcome::Continue }
//! });
//!
//! assert_eq!(stop_at, Some(&Dispatch::target(2)));
//! assert_eq!(seen, vec![(Phase::Capture, 1), (Phase::Target, 2)]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// Returns `None` if the whole sequence was visited, or the step at which a handler
/// returned [`Outcome::Stop`].
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
