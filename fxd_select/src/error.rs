// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use alloc::string::String;

/// Why a widget could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The control id does not refer to a live node.
    #[error("FxdSelect requires a <select> element, but the node does not exist")]
    MissingElement,
    /// The control is not a `select`.
    #[error("FxdSelect requires a <select> element, got <{tag}>")]
    NotSelect {
        /// Tag of the offending node (`#text` for text nodes, `#document` for the root).
        tag: String,
    },
}
