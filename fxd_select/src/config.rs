// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration: options, defaults, and caller hooks.

use alloc::{
    boxed::Box,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::future::Future;
use core::pin::Pin;

use fxd_dom::{Document, NodeId};

use crate::model::{OptionData, OptionRecord};

/// Content produced by a render hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Plain text. It is inserted as a text node and never interpreted as markup.
    Text(String),
    /// A detached element built by the hook; the widget adopts it into the view.
    Node(NodeId),
}

/// State passed to [`Config::render_option`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionState {
    /// The option is selected.
    pub selected: bool,
    /// The option is disabled.
    pub disabled: bool,
}

/// What a filter predicate gets to look at.
#[derive(Copy, Clone, Debug)]
pub struct FilterSubject<'a> {
    /// Rendered text of the option.
    pub label: &'a str,
}

/// Option-list filter predicate.
pub enum Filter {
    /// Case-insensitive substring match of the whole query.
    Substring,
    /// Every whitespace-separated word of the query must appear, case-insensitively.
    AllWords,
    /// Caller-supplied predicate `(query, subject) -> visible`.
    Custom(Box<dyn Fn(&str, &FilterSubject<'_>) -> bool>),
}

impl core::fmt::Debug for Filter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Substring => f.write_str("Substring"),
            Self::AllWords => f.write_str("AllWords"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Filter {
    /// Returns true if `subject` should stay visible for `query`. An empty query matches everything.
    pub fn matches(&self, query: &str, subject: &FilterSubject<'_>) -> bool {
        match self {
            Self::Substring => {
                query.is_empty() || subject.label.to_lowercase().contains(&query.to_lowercase())
            }
            Self::AllWords => {
                let label = subject.label.to_lowercase();
                query
                    .to_lowercase()
                    .split_whitespace()
                    .all(|word| label.contains(word))
            }
            Self::Custom(pred) => pred(query, subject),
        }
    }
}

/// Multi-select trigger summary style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MultiValueStyle {
    /// One chip per selected option, then a count chip for the rest.
    #[default]
    Pills,
    /// A single "N selected" badge.
    Count,
    /// Labels joined with `", "`, collapsing to a count past the cap.
    List,
}

impl MultiValueStyle {
    /// Parse a style name; unknown names select [`MultiValueStyle::List`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "pills" => Self::Pills,
            "count" => Self::Count,
            _ => Self::List,
        }
    }
}

/// Cap on the option list height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaxHeight {
    /// No cap.
    Auto,
    /// A CSS length such as `"12em"`. An empty length means no cap.
    Length(String),
}

impl MaxHeight {
    /// The CSS length to apply, if any.
    pub fn css(&self) -> Option<&str> {
        match self {
            Self::Auto => None,
            Self::Length(len) if len.is_empty() || len == "auto" => None,
            Self::Length(len) => Some(len),
        }
    }
}

/// Reply of a remote [`Loader`].
#[derive(Clone, Debug, PartialEq)]
pub enum LoadReply {
    /// Typed option data.
    Options(Vec<OptionData>),
    /// Raw JSON. Anything but an array is ignored.
    Json(serde_json::Value),
}

impl LoadReply {
    /// The option data carried by the reply, or `None` for a malformed reply.
    pub fn into_options(self) -> Option<Vec<OptionData>> {
        match self {
            Self::Options(data) => Some(data),
            Self::Json(serde_json::Value::Array(items)) => Some(
                items
                    .into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect(),
            ),
            Self::Json(_) => None,
        }
    }
}

impl From<Vec<OptionData>> for LoadReply {
    fn from(data: Vec<OptionData>) -> Self {
        Self::Options(data)
    }
}

impl From<serde_json::Value> for LoadReply {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Future returned by a [`Loader`].
pub type LoadFuture = Pin<Box<dyn Future<Output = LoadReply>>>;

/// Remote option source queried with the search text.
///
/// Implemented for closures `Fn(&str) -> LoadFuture`; see [`Config::with_load`] for a
/// convenience that boxes any future.
pub trait Loader {
    /// Start loading options for `query`.
    fn load(&self, query: &str) -> LoadFuture;
}

impl<F> Loader for F
where
    F: Fn(&str) -> LoadFuture,
{
    fn load(&self, query: &str) -> LoadFuture {
        self(query)
    }
}

/// Per-option render hook.
pub type RenderOption = Box<dyn Fn(&OptionRecord, OptionState, &mut Document) -> Option<Rendered>>;

/// Trigger label render hook. Receives the whole model and the native select.
pub type RenderValue = Box<dyn Fn(&[OptionRecord], NodeId, &mut Document) -> Option<Rendered>>;

/// Selection count label, given a count.
pub type CountTemplate = Box<dyn Fn(usize) -> String>;

/// Widget options.
///
/// Captured once at construction and never revalidated.
pub struct Config {
    /// Render a search box in the menu.
    pub searchable: bool,
    /// Render a clear-selection button next to the trigger (single-select only).
    pub clearable: bool,
    /// Cap on the option list height.
    pub max_height: MaxHeight,
    /// Trigger text when nothing is selected.
    pub placeholder: String,
    /// Text of the "no results" indicator.
    pub no_results_text: String,
    /// Classes of the trigger button.
    pub button_class: String,
    /// Extra classes of the wrapper.
    pub wrapper_class: String,
    /// Classes of the menu.
    pub menu_class: String,
    /// Placeholder and accessible label of the search box.
    pub filter_placeholder: String,
    /// Render a divider between the search box and the list.
    pub show_divider: bool,
    /// Custom option rendering.
    pub render_option: Option<RenderOption>,
    /// Custom trigger label rendering.
    pub render_value: Option<RenderValue>,
    /// Explicit option data, moved into the native select at construction.
    pub data: Option<Vec<OptionData>>,
    /// Remote option source; replaces local filtering.
    pub load: Option<Box<dyn Loader>>,
    /// Debounce of remote loads, in milliseconds.
    pub load_debounce: u64,
    /// Number of labels shown before summarizing (one more is shown, see the trigger label rules).
    pub max_display_items: usize,
    /// Multi-select trigger summary style.
    pub multi_value_style: MultiValueStyle,
    /// Classes of the count badge.
    pub selection_count_class: String,
    /// Count label.
    pub selection_count_template: CountTemplate,
    /// Classes of each pill.
    pub pill_class: String,
    /// Classes of the pill container.
    pub pill_container_class: String,
    /// Classes of the clear-selection button.
    pub clear_button_class: String,
    /// Accessible label of the clear-selection button.
    pub clear_button_label: String,
    /// Text of the clear-selection button.
    pub clear_button_text: String,
    /// Render a clear button inside the search box.
    pub search_clearable: bool,
    /// Classes of the search clear button.
    pub search_clear_button_class: String,
    /// Text of the search clear button.
    pub search_clear_icon: String,
    /// Accessible label of the search clear button.
    pub search_clear_aria_label: String,
    /// Warn once when Bootstrap is not detected in the document.
    pub warn_on_missing_bootstrap: bool,
    /// Bootstrap major version to look for.
    pub bootstrap_major: u32,
    /// Append a checkmark to options with a non-empty value.
    pub show_checkmark: bool,
    /// Checkmark text.
    pub checkmark_text: String,
    /// Checkmark classes.
    pub checkmark_class: String,
    /// Filter predicate for local filtering.
    pub filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            searchable: true,
            clearable: false,
            max_height: MaxHeight::Length("12em".into()),
            placeholder: "Select...".into(),
            no_results_text: "No entries found".into(),
            button_class: "form-select text-start".into(),
            wrapper_class: String::new(),
            menu_class: "dropdown-menu p-0".into(),
            filter_placeholder: "Search".into(),
            show_divider: true,
            render_option: None,
            render_value: None,
            data: None,
            load: None,
            load_debounce: 250,
            max_display_items: 3,
            multi_value_style: MultiValueStyle::Pills,
            selection_count_class: "badge bg-secondary".into(),
            selection_count_template: Box::new(|n| format!("{n} selected")),
            pill_class: "badge text-bg-light border".into(),
            pill_container_class: "fxd-pills".into(),
            clear_button_class: "btn btn-outline-secondary btn-sm".into(),
            clear_button_label: "Clear selection".into(),
            clear_button_text: "×".into(),
            search_clearable: true,
            search_clear_button_class: "btn btn-link btn-sm text-decoration-none".into(),
            search_clear_icon: "×".into(),
            search_clear_aria_label: "Clear search".into(),
            warn_on_missing_bootstrap: true,
            bootstrap_major: 5,
            show_checkmark: true,
            checkmark_text: "✓".into(),
            checkmark_class: "fxd-checkmark".into(),
            filter: Filter::Substring,
        }
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("searchable", &self.searchable)
            .field("clearable", &self.clearable)
            .field("max_height", &self.max_height)
            .field("placeholder", &self.placeholder)
            .field("render_option", &self.render_option.is_some())
            .field("render_value", &self.render_value.is_some())
            .field("data", &self.data.as_ref().map(Vec::len))
            .field("load", &self.load.is_some())
            .field("load_debounce", &self.load_debounce)
            .field("max_display_items", &self.max_display_items)
            .field("multi_value_style", &self.multi_value_style)
            .field("show_checkmark", &self.show_checkmark)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Use a custom option renderer.
    #[must_use]
    pub fn with_render_option(
        mut self,
        hook: impl Fn(&OptionRecord, OptionState, &mut Document) -> Option<Rendered> + 'static,
    ) -> Self {
        self.render_option = Some(Box::new(hook));
        self
    }

    /// Use a custom trigger label renderer.
    #[must_use]
    pub fn with_render_value(
        mut self,
        hook: impl Fn(&[OptionRecord], NodeId, &mut Document) -> Option<Rendered> + 'static,
    ) -> Self {
        self.render_value = Some(Box::new(hook));
        self
    }

    /// Use explicit option data.
    #[must_use]
    pub fn with_data(mut self, data: Vec<OptionData>) -> Self {
        self.data = Some(data);
        self
    }

    /// Load options remotely. `load` is called with the search text after the debounce.
    #[must_use]
    pub fn with_load<F, Fut>(mut self, load: F) -> Self
    where
        F: Fn(&str) -> Fut + 'static,
        Fut: Future<Output = LoadReply> + 'static,
    {
        self.load = Some(Box::new(move |query: &str| -> LoadFuture {
            Box::pin(load(query))
        }));
        self
    }

    /// Use a custom filter predicate.
    #[must_use]
    pub fn with_filter(mut self, pred: impl Fn(&str, &FilterSubject<'_>) -> bool + 'static) -> Self {
        self.filter = Filter::Custom(Box::new(pred));
        self
    }

    /// Use a custom count label.
    #[must_use]
    pub fn with_selection_count_template(mut self, tpl: impl Fn(usize) -> String + 'static) -> Self {
        self.selection_count_template = Box::new(tpl);
        self
    }

    /// Use a count label built from a pattern where `{n}` stands for the count.
    #[must_use]
    pub fn with_selection_count_pattern(self, pattern: &str) -> Self {
        let pattern = pattern.to_string();
        self.with_selection_count_template(move |n| pattern.replace("{n}", &n.to_string()))
    }
}
