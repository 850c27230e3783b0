// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: `addEventListener` / `removeEventListener` for any node key.
//!
//! A registration binds an action of your choosing (an enum, a handler index, a
//! closure id) to a node, an [`EventKind`], and a capture flag. During dispatch, ask
//! [`Listeners::matching`] for the actions to run at each [`Dispatch`](crate::types::Dispatch)
//! step:
//!
//! - [`Phase::Capture`]: capture listeners only.
//! - [`Phase::Target`]: capture listeners, then bubble listeners, each in registration order.
//! - [`Phase::Bubble`]: bubble listeners only.
//!
//! Matching returns a snapshot. If one listener removes another during the same step,
//! check [`Listeners::is_registered`] before running each snapshot entry.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::event::EventKind;
use crate::types::Phase;

/// Handle of one registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Clone, Debug)]
struct Registration<A> {
    id: ListenerId,
    capture: bool,
    action: A,
}

/// Registry of listeners keyed by node and event kind.
pub struct Listeners<K, A> {
    by_target: HashMap<(K, EventKind), SmallVec<[Registration<A>; 2]>>,
    index: HashMap<ListenerId, (K, EventKind)>,
    next_id: u64,
}

impl<K, A> core::fmt::Debug for Listeners<K, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("registered", &self.index.len())
            .field("targets", &self.by_target.len())
            .finish_non_exhaustive()
    }
}

impl<K, A> Default for Listeners<K, A> {
    fn default() -> Self {
        Self {
            by_target: HashMap::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<K, A> Listeners<K, A>
where
    K: Copy + Eq + core::hash::Hash,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `kind` events at `node`.
    ///
    /// Unlike the DOM, registering the same action twice yields two listeners.
    pub fn add(&mut self, node: K, kind: EventKind, capture: bool, action: A) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_target
            .entry((node, kind))
            .or_default()
            .push(Registration {
                id,
                capture,
                action,
            });
        self.index.insert(id, (node, kind));
        id
    }

    /// Remove a registration, returning its action. Unknown ids are ignored.
    pub fn remove(&mut self, id: ListenerId) -> Option<A> {
        let key = self.index.remove(&id)?;
        let regs = self.by_target.get_mut(&key)?;
        let pos = regs.iter().position(|r| r.id == id)?;
        let reg = regs.remove(pos);
        if regs.is_empty() {
            self.by_target.remove(&key);
        }
        Some(reg.action)
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.by_target.clear();
        self.index.clear();
    }

    /// Returns true while `id` is registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Snapshot of the listeners to run at `node` for `kind` during `phase`.
    pub fn matching(&self, node: K, kind: EventKind, phase: Phase) -> SmallVec<[(ListenerId, A); 4]>
    where
        A: Clone,
    {
        let mut out = SmallVec::new();
        let Some(regs) = self.by_target.get(&(node, kind)) else {
            return out;
        };
        let mut push = |capture: bool| {
            out.extend(
                regs.iter()
                    .filter(|r| r.capture == capture)
                    .map(|r| (r.id, r.action.clone())),
            );
        };
        match phase {
            Phase::Capture => push(true),
            Phase::Target => {
                push(true);
                push(false);
            }
            Phase::Bubble => push(false),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn actions(m: &[(ListenerId, &'static str)]) -> Vec<&'static str> {
        m.iter().map(|(_, a)| *a).collect()
    }

    #[test]
    fn phases_select_capture_and_bubble_listeners() {
        let mut l: Listeners<u32, &'static str> = Listeners::new();
        l.add(1, EventKind::Click, false, "bubble-a");
        l.add(1, EventKind::Click, true, "capture");
        l.add(1, EventKind::Click, false, "bubble-b");
        l.add(1, EventKind::KeyDown, false, "key");

        assert_eq!(actions(&l.matching(1, EventKind::Click, Phase::Capture)), ["capture"]);
        assert_eq!(
            actions(&l.matching(1, EventKind::Click, Phase::Target)),
            ["capture", "bubble-a", "bubble-b"],
            "capture listeners run first at the target"
        );
        assert_eq!(
            actions(&l.matching(1, EventKind::Click, Phase::Bubble)),
            ["bubble-a", "bubble-b"]
        );
        assert!(l.matching(2, EventKind::Click, Phase::Target).is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut l: Listeners<u32, &'static str> = Listeners::new();
        let a = l.add(1, EventKind::Change, false, "a");
        let b = l.add(1, EventKind::Change, false, "b");
        assert_eq!(l.len(), 2);

        assert_eq!(l.remove(a), Some("a"));
        assert_eq!(l.remove(a), None, "double removal is a no-op");
        assert!(!l.is_registered(a));
        assert!(l.is_registered(b));
        assert_eq!(actions(&l.matching(1, EventKind::Change, Phase::Target)), ["b"]);

        l.clear();
        assert!(l.is_empty());
        assert!(!l.is_registered(b));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut l: Listeners<u32, ()> = Listeners::new();
        let a = l.add(1, EventKind::Input, false, ());
        l.clear();
        let b = l.add(1, EventKind::Input, false, ());
        assert_ne!(a, b);
        assert!(!l.is_registered(a));
    }
}
