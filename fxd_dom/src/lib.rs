// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fxd Dom: a headless document tree for form-control widgets.
//!
//! Fxd Dom is the substrate the rest of the Fxd crates render into and read from.
//!
//! - Represents a hierarchy of elements and text nodes with attributes, a class list,
//!   inline style, and a small set of boolean element flags.
//! - Models the native form-control semantics that a select widget relies on:
//!   option enumeration, option values, selectedness, and single-select exclusivity.
//! - Tracks the little bit of document-wide interaction state a widget needs to
//!   observe: the focused element, text selection in inputs, and scroll-into-view requests.
//!
//! ## Not a browser
//!
//! This crate does not parse HTML, compute styles, or perform layout.
//! Hosts build documents through the API (or mirror a real DOM into one), hand the
//! document to widgets by `&mut`, and render the result however they like.
//! A class such as `d-none` is just a token here; what it means visually is up to the host.
//!
//! ## API overview
//!
//! - [`Document`]: container managing nodes, ownership, and document-wide state.
//! - [`NodeId`]: generational handle of a node. Handles of removed nodes become stale and
//!   every accessor degrades gracefully (returns `None`, `false`, or an empty slice).
//! - [`ElementFlags`]: `disabled`, `selected`, and `multiple` element state.
//!
//! Key operations:
//! - [`Document::create_element`] / [`Document::create_text`] → detached [`NodeId`]
//! - [`Document::append_child`] / [`Document::insert_after`] / [`Document::remove`] /
//!   [`Document::clear_children`]
//! - [`Document::contains`] and [`Document::closest`] for delegation-style lookups.
//! - [`Document::options_of`], [`Document::select_value`], [`Document::set_select_value`],
//!   and [`Document::set_option_selected`] for `select` semantics.
//!
//! ## Example
//!
//! ```rust
//! use fxd_dom::Document;
//!
//! let mut doc = Document::new();
//! let select = doc.create_element("select");
//! doc.append_child(doc.root(), select);
//!
//! for (value, label) in [("a", "Apple"), ("b", "Banana")] {
//!     let option = doc.create_element("option");
//!     doc.set_attribute(option, "value", value);
//!     doc.set_text_content(option, label);
//!     doc.append_child(select, option);
//! }
//!
//! doc.set_select_value(select, "b");
//! assert_eq!(doc.select_value(select), "b");
//! assert_eq!(doc.selected_options(select).len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod forms;
mod tree;
mod types;

pub use tree::Document;
pub use types::{ElementFlags, NodeId};
