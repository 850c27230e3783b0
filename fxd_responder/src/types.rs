// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: phases, outcomes, dispatch entries, and parent lookup.

/// Propagation phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root → parent of target.
    Capture,
    /// The target itself.
    Target,
    /// Parent of target → root.
    Bubble,
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagation after this entry.
    Stop,
}

/// One step of a propagation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node visited at this step (the event's current target).
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A capture-phase entry.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// A target-phase entry.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble-phase entry.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Parent lookup used to reconstruct root→target paths.
pub trait ParentLookup<K> {
    /// Return the parent of `node`, or `None` at the root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for &T {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

/// A parent lookup that knows no parents; every path is a singleton.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
