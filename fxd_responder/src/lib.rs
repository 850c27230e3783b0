// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fxd Responder: a deterministic, `no_std` router for DOM-style events.
//!
//! ## Overview
//!
//! This crate builds the propagation sequence of an event (capture → target → bubble)
//! for a target node, runs handlers over it while honoring stop outcomes, and keeps a
//! registry of listeners keyed by node, event kind, and phase.
//! It does not perform hit testing and it owns no tree: ancestry comes from a
//! [`ParentLookup`](crate::types::ParentLookup) you provide.
//!
//! ## Routing
//!
//! Use [`Router::dispatch_for`](router::Router::dispatch_for) to emit the sequence for a
//! target. The router reconstructs the root→target path via
//! [`ParentLookup`](crate::types::ParentLookup) or falls back to a singleton path.
//! Non-bubbling events (for example, the `input` event a widget fires on its own search
//! box) omit the bubble phase.
//!
//! The path is computed once, when dispatch starts. Handlers may mutate the tree while
//! the event is in flight without affecting which nodes the event visits.
//!
//! ## Dispatcher
//!
//! Execute handlers over the responder sequence and honor stop/cancelation with [`dispatcher::run`].
//!
//! ```
//! use fxd_responder::dispatcher;
//! use fxd_responder::types::{Dispatch, Outcome, Phase};
//! # #[derive(Copy, Clone, Debug)] struct Node(u32);
//! # let seq: Vec<Dispatch<Node>> = vec![
//! #     Dispatch::capture(Node(1)),
//! #     Dispatch::target(Node(2)),
//! #     Dispatch::bubble(Node(1)),
//! # ];
//! let mut default_prevented = false;
//! let stop_at = dispatcher::run(&seq, &mut default_prevented, |d, flag| {
//!     if matches!(d.phase, Phase::Target) {
//!         *flag = true;
//!     }
//!     Outcome::Continue
//! });
//! assert!(stop_at.is_none());
//! assert!(default_prevented);
//! ```
//!
//! ## Listeners
//!
//! [`Listeners`](listeners::Listeners) mirrors `addEventListener`: each registration
//! binds an action to a node, an [`EventKind`](event::EventKind), and a capture flag,
//! and returns a [`ListenerId`](listeners::ListenerId) for removal. Query it at every
//! step of a dispatch so that listeners removed by an earlier handler are skipped.
//!
//! ## Adapters
//!
//! The [`adapters`] module provides integration with other Fxd crates:
//!
//! - **Dom Adapter** (`dom_adapter` feature): routes over an `fxd_dom::Document`.
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
