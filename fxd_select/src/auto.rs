// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative initialization from markup.
//!
//! Every `select` carrying `data-fxd-select` or the `fxd-init-select` class is enhanced.
//! Options come from `data-fxdsel-*` attributes: `data-fxdsel-max-height="20em"` sets
//! `maxHeight`, `data-fxdsel-searchable="false"` sets `searchable`, and so on.
//!
//! ```
//! use fxd_select::Page;
//! use fxd_select::auto::Registry;
//!
//! let mut page = Page::new();
//! let doc = &mut page.document;
//! let select = doc.create_element("select");
//! doc.set_attribute(select, "data-fxd-select", "");
//! doc.set_attribute(select, "data-fxdsel-placeholder", "Pick a fruit");
//! doc.set_attribute(select, "data-fxdsel-searchable", "false");
//! doc.append_child(doc.root(), select);
//!
//! let mut registry = Registry::new();
//! let root = page.document.root();
//! assert_eq!(registry.init_all(&mut page, root).unwrap(), 1);
//!
//! let widget = registry.get(select).unwrap();
//! assert!(widget.ui().search_input.is_none());
//! assert_eq!(page.document.text_content(widget.ui().button), "Pick a fruit");
//! ```

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use fxd_dom::{Document, NodeId};
use fxd_responder::event::DomEvent;
use hashbrown::HashMap;
use serde_json::Value;

use crate::config::{Config, MaxHeight, MultiValueStyle};
use crate::error::Error;
use crate::model::OptionData;
use crate::page::Page;
use crate::widget::FxdSelect;

/// Attribute prefix of per-control options.
pub const OPTION_PREFIX: &str = "data-fxdsel-";

/// A parsed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// `true` or `false`.
    Bool(bool),
    /// `null` or `undefined`: keep the default.
    Unset,
    /// A finite number.
    Number(f64),
    /// Valid JSON wrapped in `{}` or `[]`.
    Json(Value),
    /// Anything else, verbatim.
    Text(String),
}

/// Parse an attribute value.
pub fn parse_value(raw: &str) -> AttrValue {
    match raw {
        "true" => return AttrValue::Bool(true),
        "false" => return AttrValue::Bool(false),
        "null" | "undefined" => return AttrValue::Unset,
        _ => {}
    }
    if !raw.trim().is_empty()
        && let Ok(n) = raw.trim().parse::<f64>()
        && n.is_finite()
    {
        return AttrValue::Number(n);
    }
    let wrapped = (raw.starts_with('{') && raw.ends_with('}')) || (raw.starts_with('[') && raw.ends_with(']'));
    if wrapped && let Ok(json) = serde_json::from_str(raw) {
        return AttrValue::Json(json);
    }
    AttrValue::Text(raw.into())
}

/// `max-height` to `maxHeight`.
fn camel_case(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper = false;
    for c in kebab.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// One `data-fxdsel-*` attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredOption {
    /// Option name in camel case.
    pub name: String,
    /// Parsed value.
    pub value: AttrValue,
    /// The attribute value as written.
    pub raw: String,
}

/// Option overrides declared on `select`, in attribute order.
pub fn declared_options(doc: &Document, select: NodeId) -> Vec<DeclaredOption> {
    doc.attributes(select)
        .iter()
        .filter_map(|(name, raw)| {
            let key = name.strip_prefix(OPTION_PREFIX)?;
            Some(DeclaredOption {
                name: camel_case(key),
                value: parse_value(raw),
                raw: raw.clone(),
            })
        })
        .collect()
}

fn as_count(value: &AttrValue) -> Option<u64> {
    match *value {
        AttrValue::Number(n) if n >= 0.0 => {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Declared counts are small; fractions are dropped."
            )]
            Some(n as u64)
        }
        _ => None,
    }
}

fn as_text(value: &AttrValue, raw: &str) -> Option<String> {
    (!matches!(value, AttrValue::Unset)).then(|| raw.to_string())
}

/// Apply one declared option. Returns false if the name is unknown or the value has
/// the wrong shape; the default is kept in that case.
pub fn apply_option(config: &mut Config, name: &str, value: &AttrValue, raw: &str) -> bool {
    if matches!(value, AttrValue::Unset) {
        return true;
    }
    let flag = match value {
        AttrValue::Bool(b) => Some(*b),
        _ => None,
    };
    let text_slot = match name {
        "placeholder" => Some(&mut config.placeholder),
        "noResultsText" => Some(&mut config.no_results_text),
        "buttonClass" => Some(&mut config.button_class),
        "wrapperClass" => Some(&mut config.wrapper_class),
        "menuClass" => Some(&mut config.menu_class),
        "filterPlaceholder" => Some(&mut config.filter_placeholder),
        "selectionCountClass" => Some(&mut config.selection_count_class),
        "pillClass" => Some(&mut config.pill_class),
        "pillContainerClass" => Some(&mut config.pill_container_class),
        "clearButtonClass" => Some(&mut config.clear_button_class),
        "clearButtonLabel" => Some(&mut config.clear_button_label),
        "clearButtonText" => Some(&mut config.clear_button_text),
        "searchClearButtonClass" => Some(&mut config.search_clear_button_class),
        "searchClearIcon" => Some(&mut config.search_clear_icon),
        "searchClearAriaLabel" => Some(&mut config.search_clear_aria_label),
        "checkmarkText" => Some(&mut config.checkmark_text),
        "checkmarkClass" => Some(&mut config.checkmark_class),
        _ => None,
    };
    if let Some(slot) = text_slot {
        return as_text(value, raw).map(|text| *slot = text).is_some();
    }
    let flag_slot = match name {
        "searchable" => Some(&mut config.searchable),
        "clearable" => Some(&mut config.clearable),
        "showDivider" => Some(&mut config.show_divider),
        "searchClearable" => Some(&mut config.search_clearable),
        "warnOnMissingBootstrap" => Some(&mut config.warn_on_missing_bootstrap),
        "showCheckmark" => Some(&mut config.show_checkmark),
        _ => None,
    };
    if let Some(slot) = flag_slot {
        return flag.map(|b| *slot = b).is_some();
    }

    match name {
        "loadDebounce" => as_count(value).map(|n| config.load_debounce = n).is_some(),
        "maxDisplayItems" => as_count(value)
            .and_then(|n| usize::try_from(n).ok())
            .map(|n| config.max_display_items = n)
            .is_some(),
        "bootstrapMajor" => as_count(value)
            .and_then(|n| u32::try_from(n).ok())
            .map(|n| config.bootstrap_major = n)
            .is_some(),
        "maxHeight" => {
            config.max_height = match value {
                AttrValue::Number(n) => MaxHeight::Length(format!("{n}px")),
                AttrValue::Text(t) if t == "auto" => MaxHeight::Auto,
                AttrValue::Text(t) => MaxHeight::Length(t.clone()),
                _ => return false,
            };
            true
        }
        "multiValueStyle" => match value {
            AttrValue::Text(t) => {
                config.multi_value_style = MultiValueStyle::from_name(t);
                true
            }
            _ => false,
        },
        "selectionCountTemplate" => match value {
            AttrValue::Text(t) => {
                let pattern = t.clone();
                *config = core::mem::take(config).with_selection_count_pattern(&pattern);
                true
            }
            _ => false,
        },
        "data" => match value {
            AttrValue::Json(Value::Array(items)) => {
                let data: Vec<OptionData> = items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect();
                config.data = Some(data);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// The configuration declared on `select`, over the defaults.
pub fn config_from_attributes(doc: &Document, select: NodeId) -> Config {
    let mut config = Config::default();
    for declared in declared_options(doc, select) {
        if !apply_option(&mut config, &declared.name, &declared.value, &declared.raw) {
            tracing::debug!(
                option = %declared.name,
                raw = %declared.raw,
                "fxd-select: ignoring declared option"
            );
        }
    }
    config
}

/// Returns true if `node` asks for auto-initialization.
pub fn is_marked(doc: &Document, node: NodeId) -> bool {
    doc.is_tag(node, "select")
        && (doc.has_attribute(node, "data-fxd-select") || doc.has_class(node, "fxd-init-select"))
}

/// Widgets created from markup, keyed by their native select.
#[derive(Debug, Default)]
pub struct Registry {
    instances: Vec<FxdSelect>,
    index: HashMap<NodeId, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enhance every marked `select` under `root` that is not enhanced yet.
    ///
    /// Returns how many widgets were created.
    ///
    /// # Errors
    ///
    /// Propagates the first construction error; widgets created before it are kept.
    pub fn init_all(&mut self, page: &mut Page, root: NodeId) -> Result<usize, Error> {
        let marked: Vec<NodeId> = page
            .document
            .descendants(root)
            .into_iter()
            .filter(|&n| is_marked(&page.document, n) && !self.index.contains_key(&n))
            .collect();
        let mut created = 0;
        for select in marked {
            let config = config_from_attributes(&page.document, select);
            let widget = FxdSelect::new(page, select, config)?;
            self.index.insert(select, self.instances.len());
            self.instances.push(widget);
            created += 1;
        }
        tracing::debug!(created, total = self.instances.len(), "fxd-select auto-init");
        Ok(created)
    }

    /// The widget enhancing `select`.
    pub fn get(&self, select: NodeId) -> Option<&FxdSelect> {
        self.instances.get(*self.index.get(&select)?)
    }

    /// The widget enhancing `select`, mutably.
    pub fn get_mut(&mut self, select: NodeId) -> Option<&mut FxdSelect> {
        self.instances.get_mut(*self.index.get(&select)?)
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no widget was created.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Every widget, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &FxdSelect> {
        self.instances.iter()
    }

    /// Feed a host event to every widget.
    pub fn handle_event(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        for widget in &mut self.instances {
            widget.handle_event(page, event);
        }
    }

    /// Advance every widget's clock.
    pub fn tick(&mut self, page: &mut Page, now: u64) {
        for widget in &mut self.instances {
            widget.tick(page, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::notify;
    use serde_json::json;

    fn marked_select(doc: &mut Document, attrs: &[(&str, &str)]) -> NodeId {
        let select = doc.create_element("select");
        for &(name, value) in attrs {
            doc.set_attribute(select, name, value);
        }
        for value in ["a", "b"] {
            let option = doc.create_element("option");
            doc.set_attribute(option, "value", value);
            doc.set_text_content(option, value);
            doc.append_child(select, option);
        }
        doc.append_child(doc.root(), select);
        select
    }

    #[test]
    fn values_parse_by_shape() {
        assert_eq!(parse_value("true"), AttrValue::Bool(true));
        assert_eq!(parse_value("undefined"), AttrValue::Unset);
        assert_eq!(parse_value("12.5"), AttrValue::Number(12.5));
        assert_eq!(parse_value("Infinity"), AttrValue::Text("Infinity".into()));
        assert_eq!(parse_value(""), AttrValue::Text(String::new()));
        assert_eq!(parse_value("[1,2]"), AttrValue::Json(json!([1, 2])));
        assert_eq!(parse_value("{oops}"), AttrValue::Text("{oops}".into()), "invalid JSON stays text");
        assert_eq!(parse_value("12em"), AttrValue::Text("12em".into()));
    }

    #[test]
    fn attribute_names_become_camel_case() {
        let mut doc = Document::new();
        let select = marked_select(
            &mut doc,
            &[("data-fxd-select", ""), ("data-fxdsel-max-display-items", "5"), ("id", "x")],
        );
        let declared = declared_options(&doc, select);
        assert_eq!(declared.len(), 1, "only prefixed attributes are options");
        assert_eq!(declared[0].name, "maxDisplayItems");
        assert_eq!(declared[0].value, AttrValue::Number(5.0));
        assert_eq!(declared[0].raw, "5");
    }

    #[test]
    fn declared_options_override_defaults() {
        let mut doc = Document::new();
        let select = marked_select(
            &mut doc,
            &[
                ("data-fxdsel-clearable", "true"),
                ("data-fxdsel-max-height", "200"),
                ("data-fxdsel-placeholder", "42"),
                ("data-fxdsel-load-debounce", "100"),
                ("data-fxdsel-multi-value-style", "count"),
                ("data-fxdsel-selection-count-template", "{n} picked"),
                ("data-fxdsel-data", r#"[{"value": "x", "label": "X"}, {"value": "y"}]"#),
            ],
        );
        let config = config_from_attributes(&doc, select);
        assert!(config.clearable);
        assert_eq!(config.max_height.css(), Some("200px"));
        assert_eq!(config.placeholder, "42", "text options keep the raw attribute");
        assert_eq!(config.load_debounce, 100);
        assert_eq!(config.multi_value_style, MultiValueStyle::Count);
        assert_eq!((config.selection_count_template)(3), "3 picked");
        let data = config.data.expect("data is parsed from JSON");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].label.as_deref(), Some("X"));
    }

    #[test]
    fn wrong_shapes_and_unknown_names_keep_defaults() {
        let mut doc = Document::new();
        let select = marked_select(
            &mut doc,
            &[
                ("data-fxdsel-searchable", "yes"),
                ("data-fxdsel-max-display-items", "-1"),
                ("data-fxdsel-data", "{\"value\": 1}"),
                ("data-fxdsel-placeholder", "null"),
                ("data-fxdsel-no-such-option", "1"),
                ("data-fxdsel-max-height", "auto"),
            ],
        );
        let config = config_from_attributes(&doc, select);
        let defaults = Config::default();
        assert_eq!(config.searchable, defaults.searchable);
        assert_eq!(config.max_display_items, defaults.max_display_items);
        assert!(config.data.is_none());
        assert_eq!(config.placeholder, defaults.placeholder);
        assert_eq!(config.max_height, MaxHeight::Auto);
    }

    #[test]
    fn init_all_enhances_marked_selects_once() {
        let mut page = Page::new();
        let doc = &mut page.document;
        let by_attr = marked_select(doc, &[("data-fxd-select", "")]);
        let by_class = marked_select(doc, &[]);
        doc.add_class(by_class, "fxd-init-select");
        let plain = marked_select(doc, &[]);

        let mut registry = Registry::new();
        let root = page.document.root();
        assert_eq!(registry.init_all(&mut page, root), Ok(2));
        assert_eq!(registry.init_all(&mut page, root), Ok(0), "never initialized twice");
        assert_eq!(registry.len(), 2);
        assert!(registry.get(by_attr).is_some());
        assert!(registry.get(by_class).is_some());
        assert!(registry.get(plain).is_none());
        assert_eq!(page.journal.count_notifications(notify::INIT), 2);
    }

    #[test]
    fn events_and_ticks_fan_out() {
        let mut page = Page::new();
        let doc = &mut page.document;
        let first = marked_select(doc, &[("data-fxd-select", "")]);
        let second = marked_select(doc, &[("data-fxd-select", "")]);
        let mut registry = Registry::new();
        let root = page.document.root();
        registry.init_all(&mut page, root).unwrap();

        let button = registry.get(first).unwrap().ui().button;
        registry.handle_event(&mut page, &mut DomEvent::click(button));
        assert!(registry.get(first).unwrap().is_open());

        let other = registry.get(second).unwrap().ui().button;
        registry.handle_event(&mut page, &mut DomEvent::click(other));
        assert!(!registry.get(first).unwrap().is_open(), "outside click closes the first");
        assert!(registry.get(second).unwrap().is_open());

        registry.get_mut(second).unwrap().close(&mut page);
        registry.tick(&mut page, 1_000);
        assert!(registry.iter().all(|w| !w.is_open()));
    }
}
