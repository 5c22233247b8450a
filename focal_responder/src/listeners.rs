// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: the `on` / `off` / `once` capability of event emitters.
//!
//! Listeners are keyed by emitter and [`EventType`]. Callbacks are reference counted so the
//! owning context can take a [snapshot](Listeners::snapshot) of them and then call each
//! one with mutable access to itself; a listener may add or remove listeners (or re-enter
//! dispatch) without invalidating the walk in progress.
//!
//! Each snapshot entry is [claimed](Listeners::claim) right before it runs. A listener
//! removed in the meantime is skipped, and a `once` listener is only consumed by the
//! call that actually runs it.

use alloc::rc::Rc;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::event::{EventType, FederatedEvent};

/// A listener callback.
///
/// `C` is the context the listener gets mutable access to while it runs.
pub type Callback<K, C> = Rc<dyn Fn(&mut FederatedEvent<K>, &mut C)>;

/// Token returned by [`Listeners::add`], used to remove the listener again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Phase a listener is registered for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerPhase {
    /// Runs while the event walks toward the target, and at the target.
    Capture,
    /// Runs at the target and while the event walks back to the root.
    Bubble,
}

/// A listener captured by [`Listeners::snapshot`], waiting to be run.
pub struct Scheduled<K, C> {
    /// Registration token.
    pub id: ListenerId,
    /// Whether running it consumes the registration.
    pub once: bool,
    /// The callback.
    pub callback: Callback<K, C>,
}

impl<K, C> core::fmt::Debug for Scheduled<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduled")
            .field("id", &self.id)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

struct Entry<K, C> {
    id: ListenerId,
    phase: ListenerPhase,
    once: bool,
    callback: Callback<K, C>,
}

/// Listener registry for emitters of type `T`.
pub struct Listeners<T, K, C> {
    map: HashMap<(T, EventType), SmallVec<[Entry<K, C>; 2]>>,
    owners: HashMap<ListenerId, (T, EventType)>,
    next_id: u64,
}

impl<T, K, C> core::fmt::Debug for Listeners<T, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("emitters", &self.map.len())
            .field("listeners", &self.owners.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + Eq + core::hash::Hash, K, C> Default for Listeners<T, K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + core::hash::Hash, K, C> Listeners<T, K, C> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            owners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register `callback` on `target` for events of `kind`.
    ///
    /// `once` listeners are dropped the first time they are [claimed](Self::claim).
    pub fn add(
        &mut self,
        target: T,
        kind: EventType,
        phase: ListenerPhase,
        once: bool,
        callback: Callback<K, C>,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.map.entry((target, kind)).or_default().push(Entry {
            id,
            phase,
            once,
            callback,
        });
        self.owners.insert(id, (target, kind));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(key) = self.owners.remove(&id) else {
            return false;
        };
        if let Some(entries) = self.map.get_mut(&key) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                self.map.remove(&key);
            }
        }
        true
    }

    /// Remove every listener registered on `target`. Returns how many were removed.
    pub fn remove_target(&mut self, target: T) -> usize {
        let before = self.owners.len();
        self.owners.retain(|_, (t, _)| *t != target);
        self.map.retain(|(t, _), _| *t != target);
        before - self.owners.len()
    }

    /// Listeners to run on `target` for `kind` in `phase`, in registration order.
    ///
    /// Nothing is removed; run each entry only if [`claim`](Self::claim) accepts it.
    pub fn snapshot(
        &self,
        target: T,
        kind: EventType,
        phase: ListenerPhase,
    ) -> SmallVec<[Scheduled<K, C>; 4]> {
        self.map
            .get(&(target, kind))
            .into_iter()
            .flatten()
            .filter(|e| e.phase == phase)
            .map(|e| Scheduled {
                id: e.id,
                once: e.once,
                callback: e.callback.clone(),
            })
            .collect()
    }

    /// Whether a snapshotted listener is still registered and may run now.
    ///
    /// A `once` listener is removed by a successful claim.
    pub fn claim(&mut self, scheduled: &Scheduled<K, C>) -> bool {
        if scheduled.once {
            self.remove(scheduled.id)
        } else {
            self.owners.contains_key(&scheduled.id)
        }
    }

    /// Whether `target` has any listener for `kind`.
    pub fn has_listeners(&self, target: T, kind: EventType) -> bool {
        self.map.contains_key(&(target, kind))
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventData;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    type Log = RefCell<Vec<&'static str>>;

    fn cb(name: &'static str) -> Callback<u32, Log> {
        Rc::new(move |_ev: &mut FederatedEvent<u32>, log: &mut Log| log.borrow_mut().push(name))
    }

    fn run(reg: &mut Listeners<u32, u32, Log>, scheduled: &[Scheduled<u32, Log>], log: &mut Log) {
        let mut ev = FederatedEvent::new(EventType::Focus, EventData::Focus);
        for s in scheduled {
            if reg.claim(s) {
                (s.callback)(&mut ev, log);
            }
        }
    }

    #[test]
    fn snapshot_filters_by_phase_and_keeps_order() {
        let mut reg: Listeners<u32, u32, Log> = Listeners::new();
        reg.add(1, EventType::Focus, ListenerPhase::Bubble, false, cb("a"));
        reg.add(1, EventType::Focus, ListenerPhase::Capture, false, cb("cap"));
        reg.add(1, EventType::Focus, ListenerPhase::Bubble, false, cb("b"));
        reg.add(2, EventType::Focus, ListenerPhase::Bubble, false, cb("other"));

        let mut log = Log::default();
        let scheduled = reg.snapshot(1, EventType::Focus, ListenerPhase::Bubble);
        run(&mut reg, &scheduled, &mut log);
        assert_eq!(*log.borrow(), ["a", "b"]);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn once_listeners_fire_once() {
        let mut reg: Listeners<u32, u32, Log> = Listeners::new();
        reg.add(1, EventType::Removed, ListenerPhase::Bubble, true, cb("once"));
        reg.add(1, EventType::Removed, ListenerPhase::Bubble, false, cb("always"));

        let mut log = Log::default();
        for _ in 0..2 {
            let scheduled = reg.snapshot(1, EventType::Removed, ListenerPhase::Bubble);
            run(&mut reg, &scheduled, &mut log);
        }
        assert_eq!(*log.borrow(), ["once", "always", "always"]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unclaimed_once_listener_stays_registered() {
        let mut reg: Listeners<u32, u32, Log> = Listeners::new();
        reg.add(1, EventType::Removed, ListenerPhase::Bubble, false, cb("first"));
        reg.add(1, EventType::Removed, ListenerPhase::Bubble, true, cb("once"));

        // Only the first entry gets to run, as when propagation stops immediately.
        let scheduled = reg.snapshot(1, EventType::Removed, ListenerPhase::Bubble);
        assert_eq!(scheduled.len(), 2);
        let mut log = Log::default();
        run(&mut reg, &scheduled[..1], &mut log);
        assert_eq!(reg.len(), 2, "the skipped once listener is not consumed");

        let scheduled = reg.snapshot(1, EventType::Removed, ListenerPhase::Bubble);
        run(&mut reg, &scheduled, &mut log);
        assert_eq!(*log.borrow(), ["first", "first", "once"]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn listeners_removed_after_snapshot_do_not_run() {
        let mut reg: Listeners<u32, u32, Log> = Listeners::new();
        let a = reg.add(1, EventType::Focus, ListenerPhase::Bubble, false, cb("a"));
        reg.add(1, EventType::Focus, ListenerPhase::Bubble, false, cb("b"));

        let scheduled = reg.snapshot(1, EventType::Focus, ListenerPhase::Bubble);
        reg.remove(a);
        let mut log = Log::default();
        run(&mut reg, &scheduled, &mut log);
        assert_eq!(*log.borrow(), ["b"]);
    }

    #[test]
    fn remove_and_remove_target() {
        let mut reg: Listeners<u32, u32, Log> = Listeners::new();
        let a = reg.add(1, EventType::Blur, ListenerPhase::Bubble, false, cb("a"));
        reg.add(1, EventType::Focus, ListenerPhase::Bubble, false, cb("b"));
        reg.add(2, EventType::Focus, ListenerPhase::Bubble, false, cb("c"));

        assert!(reg.remove(a));
        assert!(!reg.remove(a), "second removal is a no-op");
        assert!(!reg.has_listeners(1, EventType::Blur));

        assert_eq!(reg.remove_target(1), 1);
        assert!(!reg.has_listeners(1, EventType::Focus));
        assert!(reg.has_listeners(2, EventType::Focus));
        assert_eq!(reg.len(), 1);
    }
}
