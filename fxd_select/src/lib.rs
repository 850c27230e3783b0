// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fxd Select: a searchable, keyboard-navigable dropdown over a native `select`.
//!
//! ## Overview
//!
//! [`FxdSelect`] enhances one `select` element of an [`fxd_dom::Document`]. It hides
//! the select, renders a Bootstrap-style dropdown right after it, and keeps the two in
//! sync. The select stays the source of truth for what is selected: choosing an item
//! writes to the select and fires its `change` event, and every `change` on the select
//! rebuilds the dropdown.
//!
//! The pieces, leaves first:
//!
//! - [`model`]: option records parsed from the select or built from explicit data, and
//!   the write-back of records into the select.
//! - [`filter`]: local filtering of the rendered items and their group headers.
//! - [`render`]: projection of the model into the document.
//! - [`controller`]: listener bindings, focus tracking, and the `CLOSED`/`OPEN` handlers.
//! - [`FxdSelect`]: lifecycle (`open`, `close`, `refresh`, `destroy`) and value access.
//! - [`auto`]: enhancement of marked selects with options declared in attributes.
//!
//! ## Host loop
//!
//! The widget never owns the document. Every operation takes the [`Page`], which bundles
//! the document with a [`Journal`] of the events widgets dispatch (native `change` and
//! `input`, plus the [`notify`] events). Hosts feed input through
//! [`FxdSelect::handle_event`] and advance time through [`FxdSelect::tick`], which fires
//! debounced remote loads and polls their futures.
//!
//! ## Example
//!
//! ```
//! use fxd_responder::event::{DomEvent, Key};
//! use fxd_select::{Config, FxdSelect, Page, notify};
//!
//! let mut page = Page::new();
//! let doc = &mut page.document;
//! let select = doc.create_element("select");
//! doc.append_child(doc.root(), select);
//! for (value, label) in [("a", "Apple"), ("b", "Banana"), ("c", "Cherry")] {
//!     let option = doc.create_element("option");
//!     doc.set_attribute(option, "value", value);
//!     doc.set_text_content(option, label);
//!     doc.append_child(select, option);
//! }
//!
//! let mut widget = FxdSelect::new(&mut page, select, Config::default()).unwrap();
//! let button = widget.ui().button;
//!
//! // Open with the keyboard, move to "Banana", and pick it.
//! for key in [Key::ArrowDown, Key::ArrowDown, Key::Enter] {
//!     widget.handle_event(&mut page, &mut DomEvent::key_down(button, key));
//! }
//!
//! assert_eq!(widget.get_value(&page.document), "b");
//! assert!(!widget.is_open());
//! assert_eq!(page.journal.count_notifications(notify::OPEN), 1);
//! assert_eq!(page.journal.count_notifications(notify::CHANGE), 1);
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber. Lifecycle and
//! remote-load events are `debug`, focus moves and filter summaries are `trace`, and a
//! missing Bootstrap stylesheet is reported once per process as a `warn`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod auto;
pub mod config;
pub mod controller;
pub mod env;
mod error;
pub mod filter;
pub mod ids;
pub mod model;
mod page;
pub mod render;
mod widget;

pub use config::{Config, Filter, FilterSubject, LoadReply, MaxHeight, MultiValueStyle, Rendered};
pub use error::Error;
pub use model::{OptionData, OptionRecord};
pub use page::{Journal, JournalEntry, Page, notify};
pub use widget::FxdSelect;
