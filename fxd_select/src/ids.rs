// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-unique element ids for `aria-controls` / `aria-activedescendant` links.

use alloc::{format, string::String};
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A fresh id of the form `<prefix>-<n>`.
///
/// The counter is shared by every widget in the process, so ids never collide
/// across instances in the same document.
pub fn create_id(prefix: &str) -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{prefix}-{n}")
}
