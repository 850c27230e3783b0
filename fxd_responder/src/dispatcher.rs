// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! The dispatcher executes handlers for each step in a responder sequence and
//! applies simple propagation rules. It is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - Higher-level semantics such as "default prevented" live on the event payload
//!   you pass to [`run`] (see [`DomEvent`](crate::event::DomEvent)), not in [`Outcome`].
//!
//! ## Semantics
//!
//! - Entries are processed in order.
//! - The router groups phases into capture → target → bubble.
//! - [`Outcome::Stop`] aborts propagation immediately (no target/bubble if raised in capture).
//! - Returns the last visited dispatch entry if propagation stopped early, or
//!   `None` if the sequence completed.
//!
//! ## Listener-driven dispatch
//!
//! With a [`Listeners`](crate::listeners::Listeners) registry, query the matching
//! listeners inside the handler and translate `stopPropagation` into [`Outcome::Stop`]:
//!
//! ```
//! use fxd_responder::dispatcher;
//! use fxd_responder::event::{DomEvent, EventKind};
//! use fxd_responder::listeners::Listeners;
//! use fxd_responder::router::Router;
//! use fxd_responder::types::{Outcome, ParentLookup};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let mut listeners: Listeners<u32, &str> = Listeners::new();
//! listeners.add(1, EventKind::Click, false, "outer");
//! listeners.add(2, EventKind::Click, false, "inner");
//!
//! let mut event = DomEvent::click(2);
//! let seq = Router::with_parent(Parents).dispatch_for(event.target, event.bubbles);
//! let mut fired = Vec::new();
//! dispatcher::run(&seq, &mut event, |d, ev| {
//!     for (_, action) in listeners.matching(d.node, ev.kind, d.phase) {
//!         fired.push(action);
//!         ev.stop_propagation();
//!     }
//!     if ev.propagation_stopped { Outcome::Stop } else { Outcome::Continue }
//! });
//! assert_eq!(fired, vec!["inner"]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// - [`Outcome::Continue`]: keep going.
/// - [`Outcome::Stop`]: abort propagation immediately (no later phases).
///
/// Returns `None` if the full sequence was visited, or `Some(d)` with the last
/// visited entry if a handler returned [`Outcome::Stop`].
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
