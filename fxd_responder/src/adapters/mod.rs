// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Fxd crates.
//!
//! Each adapter is gated behind a feature flag to keep the core responder lightweight.
//!
//! ## Available Adapters
//!
//! - `dom` (`dom_adapter` feature): routes events over an `fxd_dom::Document`.

#[cfg(feature = "dom_adapter")]
pub mod dom;
