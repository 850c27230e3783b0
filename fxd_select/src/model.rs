// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option model: records derived from the native select or from external data.
//!
//! The model is rebuilt from scratch on every refresh. Explicit data wins over the
//! select's children when building; [`sync_select_with_model`] is the only path that
//! writes a model back into the native control.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use fxd_dom::{Document, ElementFlags, NodeId};
use hashbrown::HashSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::Config;

/// One selectable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRecord {
    /// Submitted value. Duplicates are allowed and treated independently.
    pub value: String,
    /// Display text.
    pub label: String,
    /// Selected state.
    pub selected: bool,
    /// Excluded from activation and focus traversal, still rendered.
    pub disabled: bool,
    /// Group label, if any. Never the empty string.
    pub group: Option<String>,
    /// The native `option` this record was parsed from.
    pub element: Option<NodeId>,
}

/// Plain option data as supplied by callers or remote loaders.
///
/// Deserialization is lenient: numbers and booleans are accepted for `value`,
/// `label`, and `group`, `selected` is only honored when it is a boolean, and
/// `disabled` follows truthiness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionData {
    /// Submitted value; missing or `null` becomes `""`.
    #[serde(deserialize_with = "de_value")]
    pub value: String,
    /// Display text; defaults to the value.
    #[serde(deserialize_with = "de_opt_text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Explicit selection; when absent, the native select's current selection decides.
    #[serde(deserialize_with = "de_opt_bool", skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    /// Disabled state.
    #[serde(deserialize_with = "de_truthy")]
    pub disabled: bool,
    /// Group label.
    #[serde(deserialize_with = "de_opt_text", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl OptionData {
    /// Data for `value` with every other field defaulted.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the explicit selection.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Set the disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the group.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn de_value<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(de)?).unwrap_or_default())
}

fn de_opt_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(de)?))
}

fn de_opt_bool<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(de)?.as_bool())
}

fn de_truthy<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn non_empty(group: Option<String>) -> Option<String> {
    group.filter(|g| !g.is_empty())
}

/// Records for every option of `select`, in document order.
pub fn parse_select(doc: &Document, select: NodeId) -> Vec<OptionRecord> {
    doc.options_of(select)
        .into_iter()
        .map(|option| OptionRecord {
            value: doc.option_value(option),
            label: doc.text_content(option),
            selected: doc.is_selected(option),
            disabled: doc.is_disabled(option),
            group: non_empty(doc.optgroup_label(option)),
            element: Some(option),
        })
        .collect()
}

/// Records for explicit `data`.
///
/// Entries without an explicit `selected` are selected when their value is among the
/// native select's current value(s), so new data keeps the current selection.
pub fn normalize_options(data: &[OptionData], doc: &Document, select: NodeId) -> Vec<OptionRecord> {
    let current: HashSet<String> = if doc.is_multiple(select) {
        doc.selected_options(select)
            .into_iter()
            .map(|o| doc.option_value(o))
            .collect()
    } else {
        core::iter::once(doc.select_value(select)).collect()
    };

    data.iter()
        .map(|item| OptionRecord {
            value: item.value.clone(),
            label: item.label.clone().unwrap_or_else(|| item.value.clone()),
            selected: item
                .selected
                .unwrap_or_else(|| current.contains(&item.value)),
            disabled: item.disabled,
            group: non_empty(item.group.clone()),
            element: None,
        })
        .collect()
}

/// Build the model: configured data if present, otherwise the select's children.
pub fn build_model(doc: &Document, select: NodeId, config: &Config) -> Vec<OptionRecord> {
    match &config.data {
        Some(data) => normalize_options(data, doc, select),
        None => parse_select(doc, select),
    }
}

/// Replace the select's children with options generated from `model`.
///
/// A new `optgroup` opens whenever a record's group differs from the previous
/// record's, so a recurring group gets a container per run and document order
/// matches the model. Selection is applied through the control, so a single-select
/// keeps only the last selected record.
pub fn sync_select_with_model(doc: &mut Document, select: NodeId, model: &[OptionRecord]) {
    doc.clear_children(select);
    let mut run: Option<(&str, NodeId)> = None;

    for record in model {
        let parent = match (record.group.as_deref(), run) {
            (Some(group), Some((name, el))) if name == group => el,
            (Some(group), _) => {
                let el = doc.create_element("optgroup");
                doc.set_attribute(el, "label", group);
                doc.append_child(select, el);
                run = Some((group, el));
                el
            }
            (None, _) => {
                run = None;
                select
            }
        };

        let option = doc.create_element("option");
        doc.set_attribute(option, "value", &record.value);
        doc.set_text_content(option, &record.label);
        doc.set_flag(option, ElementFlags::DISABLED, record.disabled);
        doc.append_child(parent, option);
        doc.set_option_selected(option, record.selected);
    }
}
