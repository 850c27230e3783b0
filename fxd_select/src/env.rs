// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Advisory check for the Bootstrap styles the generated markup relies on.

use core::sync::atomic::{AtomicBool, Ordering};

use fxd_dom::Document;

static WARNED: AtomicBool = AtomicBool::new(false);

/// Returns true if the document appears to load Bootstrap `major`.
///
/// Looks at `link[href]` and `script[src]` references containing `bootstrap`. When a
/// version follows `bootstrap@`, `bootstrap/` or `bootstrap-`, its major must match;
/// unversioned references count. Any element carrying `data-bs-theme` counts as well.
pub fn bootstrap_detected(doc: &Document, major: u32) -> bool {
    doc.descendants(doc.root()).into_iter().any(|node| {
        if doc.has_attribute(node, "data-bs-theme") {
            return true;
        }
        let reference = if doc.is_tag(node, "link") {
            doc.attribute(node, "href")
        } else if doc.is_tag(node, "script") {
            doc.attribute(node, "src")
        } else {
            None
        };
        reference.is_some_and(|r| references_bootstrap(r, major))
    })
}

fn references_bootstrap(reference: &str, major: u32) -> bool {
    let lower = reference.to_ascii_lowercase();
    let mut found = false;
    for (pos, _) in lower.match_indices("bootstrap") {
        found = true;
        let rest = &lower[pos + "bootstrap".len()..];
        let Some(after_sep) = rest
            .strip_prefix('@')
            .or_else(|| rest.strip_prefix('/'))
            .or_else(|| rest.strip_prefix('-'))
        else {
            continue;
        };
        let digits: &str = after_sep
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or_default();
        if let Ok(version) = digits.parse::<u32>() {
            return version == major;
        }
    }
    found
}

/// Warn (once per process) when Bootstrap `major` is not detected.
///
/// Returns true if this call emitted the warning.
pub fn warn_if_missing_bootstrap(doc: &Document, major: u32) -> bool {
    if bootstrap_detected(doc, major) || WARNED.swap(true, Ordering::Relaxed) {
        return false;
    }
    tracing::warn!(
        major,
        "fxd-select: Bootstrap {major} was not detected; the dropdown relies on its styles"
    );
    true
}
