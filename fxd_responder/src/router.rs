// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Builds propagation sequences for targets.
///
/// ## Example
///
/// ```
/// use fxd_responder::router::Router;
/// use fxd_responder::types::{ParentLookup, Phase};
///
/// struct Parents;
/// impl ParentLookup<u32> for Parents {
///     fn parent_of(&self, node: &u32) -> Option<u32> {
///         (*node > 1).then(|| node - 1)
///     }
/// }
///
/// let router = Router::with_parent(Parents);
/// let seq = router.dispatch_for(3, true);
/// let steps: Vec<(Phase, u32)> = seq.iter().map(|d| (d.phase, d.node)).collect();
/// assert_eq!(steps, vec![
///     (Phase::Capture, 1), (Phase::Capture, 2),
///     (Phase::Target, 3),
///     (Phase::Bubble, 2), (Phase::Bubble, 1),
/// ]);
/// ```
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    parent: P,
    _marker: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router using `parent` to reconstruct paths.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _marker: core::marker::PhantomData,
        }
    }

    /// Emit the propagation sequence for `target`.
    ///
    /// Capture runs root→parent, then the target once, then (when `bubbles`) bubble
    /// runs parent→root. The target never appears in the capture or bubble phases.
    pub fn dispatch_for(&self, target: K, bubbles: bool) -> Vec<Dispatch<K>> {
        let path = self.reconstruct_path(target);
        Self::emit_path(&path, bubbles)
    }

    /// The root→target path for `target` (inclusive).
    pub fn path_for(&self, target: K) -> Vec<K> {
        self.reconstruct_path(target)
    }

    fn reconstruct_path(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path(path: &[K], bubbles: bool) -> Vec<Dispatch<K>> {
        let mut out = Vec::new();
        // Split into ancestors and target. If path is empty, nothing to emit.
        let Some((&target, ancestors)) = path.split_last() else {
            return out;
        };

        // Capture: root→(excluding target)
        out.extend(ancestors.iter().map(|&n| Dispatch::capture(n)));

        // Target: only the target element
        out.push(Dispatch::target(target));

        // Bubble: parent→root (excluding target)
        if bubbles {
            out.extend(ancestors.iter().rev().map(|&n| Dispatch::bubble(n)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher;
    use crate::types::Outcome;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Node(u32);

    struct Parents;
    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    fn steps(seq: &[Dispatch<Node>]) -> Vec<(Phase, u32)> {
        seq.iter().map(|d| (d.phase, d.node.0)).collect()
    }

    // dispatch_for reconstructs a path via ParentLookup and emits capture→target→bubble.
    #[test]
    fn dispatch_for_reconstructs_path() {
        let router = Router::with_parent(Parents);
        let out = router.dispatch_for(Node(3), true);
        assert_eq!(
            steps(&out),
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
        assert_eq!(router.path_for(Node(3)), vec![Node(1), Node(2), Node(3)]);
    }

    #[test]
    fn non_bubbling_events_skip_bubble_phase() {
        let router = Router::with_parent(Parents);
        let out = router.dispatch_for(Node(3), false);
        assert_eq!(
            steps(&out),
            vec![(Phase::Capture, 1), (Phase::Capture, 2), (Phase::Target, 3)]
        );
    }

    // dispatch_for without parent lookup falls back to singleton path.
    #[test]
    fn dispatch_for_singleton_without_parent() {
        let router: Router<Node, NoParent> = Router::new();
        let out = router.dispatch_for(Node(42), true);
        assert_eq!(steps(&out), vec![(Phase::Target, 42)]);
    }

    #[test]
    fn router_dispatch_and_dispatcher_stop_skips_bubble() {
        let router = Router::with_parent(Parents);
        let dispatch = router.dispatch_for(Node(3), true);
        let mut seen: Vec<(Phase, u32)> = Vec::new();
        let stopped = dispatcher::run(&dispatch, &mut (), |d, _| {
            seen.push((d.phase, d.node.0));
            if matches!(d.phase, Phase::Target) {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });

        let stopped = stopped.expect("handler stopped at the target");
        assert_eq!(stopped.node, Node(3));
        assert_eq!(
            seen,
            vec![(Phase::Capture, 1), (Phase::Capture, 2), (Phase::Target, 3)]
        );
    }

    #[test]
    fn target_element_receives_event_only_once() {
        let router = Router::with_parent(Parents);
        let dispatch = router.dispatch_for(Node(3), true);
        let target_phases: Vec<Phase> = dispatch
            .iter()
            .filter(|d| d.node.0 == 3)
            .map(|d| d.phase)
            .collect();
        assert_eq!(
            target_phases,
            vec![Phase::Target],
            "Target node should only receive event in target phase"
        );
        assert_eq!(dispatch.iter().filter(|d| d.node.0 == 1).count(), 2);
    }
}
