// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fxd Focus: linear focus navigation primitives.
//!
//! This crate models keyboard focus movement through a list as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`] (`ArrowDown`),
//!   [`Navigation::Prev`] (`ArrowUp`), [`Navigation::First`] (`Home`), and
//!   [`Navigation::Last`] (`End`).
//! - An **ordered view of candidates** ([`FocusEntry`] / [`FocusSpace`]) with per-entry
//!   enabled state and an optional explicit ordering key.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next focused entry given an
//!   optional origin, an intent, and a read-only view of candidates.
//!
//! Disabled entries are never returned by the default policy, whatever the intent.
//!
//! ## Minimal example
//!
//! A listbox of three options where the middle one is disabled:
//!
//! ```rust
//! use fxd_focus::{DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, Navigation, WrapMode};
//!
//! let entries = [
//!     FocusEntry::new(1_u32),
//!     FocusEntry { enabled: false, ..FocusEntry::new(2) },
//!     FocusEntry::new(3),
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = DefaultPolicy { wrap: WrapMode::Clamp };
//!
//! // ArrowDown skips the disabled option…
//! assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
//! // …and stays on the last option instead of wrapping.
//! assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(3));
//! // With nothing focused, both arrows land on the first option.
//! assert_eq!(policy.next(None, Navigation::Prev, &space), Some(1));
//! // The focus index counts enabled candidates only.
//! assert_eq!(space.position(3), Some(1));
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use any small,
//! copyable handle (for example `fxd_dom::NodeId`, or a plain index).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Direction of focus navigation.
///
/// These values represent high-level navigation intents. Concrete policies interpret
/// them according to their own rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in forward order (for example, `ArrowDown`).
    Next,
    /// Move to the previous candidate in forward order (for example, `ArrowUp`).
    Prev,
    /// Jump to the first candidate (for example, `Home`).
    First,
    /// Jump to the last candidate (for example, `End`).
    Last,
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this focusable node.
    pub id: K,
    /// Optional explicit ordering key. Entries with a key come first.
    pub order: Option<i32>,
    /// Whether this node is enabled for focus.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// An enabled entry without an explicit order.
    pub const fn new(id: K) -> Self {
        Self {
            id,
            order: None,
            enabled: true,
        }
    }
}

/// A read-only view of focusable candidates in presentation order.
///
/// Policies should treat it as an immutable snapshot.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates, in the order they are presented.
    pub nodes: &'a [FocusEntry<K>],
}

impl<K> FocusSpace<'_, K>
where
    K: Copy + Eq,
{
    /// Enabled candidates in traversal order.
    ///
    /// Explicitly ordered entries come first (ascending); the rest keep their
    /// presentation order.
    pub fn candidates(&self) -> Vec<K> {
        let mut enabled: Vec<&FocusEntry<K>> = self.nodes.iter().filter(|e| e.enabled).collect();
        // `sort_by_key` is stable, so unordered entries keep their relative order.
        enabled.sort_by_key(|e| (e.order.is_none(), e.order.unwrap_or_default()));
        enabled.into_iter().map(|e| e.id).collect()
    }

    /// Position of `id` among the enabled candidates.
    pub fn position(&self, id: K) -> Option<usize> {
        self.candidates().iter().position(|&c| c == id)
    }

    /// The enabled candidate at `index`.
    pub fn at(&self, index: usize) -> Option<K> {
        self.candidates().get(index).copied()
    }
}

/// Wrap mode configuration for focus traversal.
///
/// Policies may consult this to decide what happens at the edges of the sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; reaching the end of the sequence yields no next candidate.
    Never,
    /// Do not wrap; stepping past an edge stays on the edge candidate.
    Clamp,
    /// Wrap around to the opposite edge.
    Scope,
}

/// Trait for focus traversal policies.
///
/// A policy receives a navigation intent, the current origin (if anything is focused),
/// and a read-only view of candidates, and returns the next focused node if any.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target given an origin, navigation intent, and focus space.
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Default linear focus traversal policy.
///
/// An origin that is absent or not among the enabled candidates starts traversal at the
/// first candidate for both [`Navigation::Next`] and [`Navigation::Prev`].
#[derive(Copy, Clone, Debug)]
pub struct DefaultPolicy {
    /// Wrap behavior when traversing focusable candidates.
    pub wrap: WrapMode,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Scope,
        }
    }
}

impl<K> FocusPolicy<K> for DefaultPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let candidates = space.candidates();
        let first = *candidates.first()?;
        let last = *candidates.last()?;
        let origin_pos = origin.and_then(|o| candidates.iter().position(|&c| c == o));

        match direction {
            Navigation::First => Some(first),
            Navigation::Last => Some(last),
            Navigation::Next => match origin_pos {
                Some(pos) if pos + 1 < candidates.len() => Some(candidates[pos + 1]),
                Some(_) => match self.wrap {
                    WrapMode::Never => None,
                    WrapMode::Clamp => Some(last),
                    WrapMode::Scope => Some(first),
                },
                None => Some(first),
            },
            Navigation::Prev => match origin_pos {
                Some(pos) if pos > 0 => Some(candidates[pos - 1]),
                Some(_) => match self.wrap {
                    WrapMode::Never => None,
                    WrapMode::Clamp => Some(first),
                    WrapMode::Scope => Some(last),
                },
                None => Some(first),
            },
        }
    }
}
