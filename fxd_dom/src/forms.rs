// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native form-control semantics for `select`, `optgroup`, and `option`.

use alloc::{string::String, vec::Vec};

use crate::tree::Document;
use crate::types::{ElementFlags, NodeId};

impl Document {
    /// Options of a select in document order: direct `option` children and the
    /// `option` children of direct `optgroup` children.
    pub fn options_of(&self, select: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &child in self.children_of(select) {
            if self.is_tag(child, "option") {
                out.push(child);
            } else if self.is_tag(child, "optgroup") {
                out.extend(
                    self.children_of(child)
                        .iter()
                        .copied()
                        .filter(|&n| self.is_tag(n, "option")),
                );
            }
        }
        out
    }

    /// The select that owns `option`, looking through an intermediate `optgroup`.
    pub fn owner_select(&self, option: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(option)?;
        if self.is_tag(parent, "select") {
            return Some(parent);
        }
        if self.is_tag(parent, "optgroup") {
            return self.parent_of(parent).filter(|&p| self.is_tag(p, "select"));
        }
        None
    }

    /// Label of the `optgroup` directly containing `option`, if any.
    pub fn optgroup_label(&self, option: NodeId) -> Option<String> {
        let parent = self.parent_of(option)?;
        if !self.is_tag(parent, "optgroup") {
            return None;
        }
        Some(self.attribute(parent, "label").unwrap_or_default().into())
    }

    /// The text of an option with whitespace stripped and collapsed.
    pub fn option_text(&self, option: NodeId) -> String {
        collapse_whitespace(&self.text_content(option))
    }

    /// The value of an option: its `value` attribute, else its collapsed text.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attribute(option, "value") {
            Some(v) => v.into(),
            None => self.option_text(option),
        }
    }

    /// Returns true if the option is currently selected.
    pub fn is_selected(&self, option: NodeId) -> bool {
        self.flags(option)
            .is_some_and(|f| f.contains(ElementFlags::SELECTED))
    }

    /// Returns true if the select allows multiple selected options.
    pub fn is_multiple(&self, select: NodeId) -> bool {
        self.flags(select)
            .is_some_and(|f| f.contains(ElementFlags::MULTIPLE))
    }

    /// Set the `multiple` state of a select.
    ///
    /// Switching to single-select keeps only the first selected option.
    pub fn set_multiple(&mut self, select: NodeId, multiple: bool) {
        self.set_flag(select, ElementFlags::MULTIPLE, multiple);
        if !multiple {
            let selected = self.selected_options(select);
            for &extra in selected.iter().skip(1) {
                self.set_flag(extra, ElementFlags::SELECTED, false);
            }
        }
    }

    /// Selected options in document order.
    pub fn selected_options(&self, select: NodeId) -> Vec<NodeId> {
        self.options_of(select)
            .into_iter()
            .filter(|&o| self.is_selected(o))
            .collect()
    }

    /// The value of the first selected option, or `""` when nothing is selected.
    pub fn select_value(&self, select: NodeId) -> String {
        self.options_of(select)
            .into_iter()
            .find(|&o| self.is_selected(o))
            .map(|o| self.option_value(o))
            .unwrap_or_default()
    }

    /// Select the first option whose value equals `value` and deselect all others.
    ///
    /// Returns false when no option matched; in that case nothing is left selected.
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> bool {
        let mut matched = false;
        for option in self.options_of(select) {
            let hit = !matched && self.option_value(option) == value;
            matched |= hit;
            self.set_flag(option, ElementFlags::SELECTED, hit);
        }
        matched
    }

    /// Set one option's selectedness.
    ///
    /// In a single-select, selecting an option deselects every other option of the
    /// same select.
    pub fn set_option_selected(&mut self, option: NodeId, selected: bool) {
        if self.tag(option) != Some("option") {
            return;
        }
        if selected
            && let Some(select) = self.owner_select(option)
            && !self.is_multiple(select)
        {
            for other in self.options_of(select) {
                if other != option {
                    self.set_flag(other, ElementFlags::SELECTED, false);
                }
            }
        }
        self.set_flag(option, ElementFlags::SELECTED, selected);
    }
}

/// Strip leading and trailing whitespace and collapse internal runs to one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_ascii_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn option(doc: &mut Document, parent: NodeId, value: Option<&str>, text: &str) -> NodeId {
        let o = doc.create_element("option");
        if let Some(v) = value {
            doc.set_attribute(o, "value", v);
        }
        doc.set_text_content(o, text);
        doc.append_child(parent, o);
        o
    }

    fn fruit_select(doc: &mut Document) -> (NodeId, [NodeId; 3]) {
        let select = doc.create_element("select");
        doc.append_child(doc.root(), select);
        let a = option(doc, select, Some("a"), "Apple");
        let group = doc.create_element("optgroup");
        doc.set_attribute(group, "label", "Yellow");
        doc.append_child(select, group);
        let b = option(doc, group, Some("b"), "Banana");
        let c = option(doc, select, None, "  Cherry \n red ");
        (select, [a, b, c])
    }

    #[test]
    fn options_are_enumerated_through_optgroups() {
        let mut doc = Document::new();
        let (select, [a, b, c]) = fruit_select(&mut doc);
        assert_eq!(doc.options_of(select), vec![a, b, c]);
        assert_eq!(doc.owner_select(b), Some(select));
        assert_eq!(doc.optgroup_label(b).as_deref(), Some("Yellow"));
        assert!(doc.optgroup_label(a).is_none());
    }

    #[test]
    fn option_value_falls_back_to_collapsed_text() {
        let mut doc = Document::new();
        let (_, [a, _, c]) = fruit_select(&mut doc);
        assert_eq!(doc.option_value(a), "a");
        assert_eq!(doc.option_value(c), "Cherry red");
        assert_eq!(doc.option_text(c), "Cherry red");
    }

    #[test]
    fn no_implicit_default_selection() {
        let mut doc = Document::new();
        let (select, _) = fruit_select(&mut doc);
        assert_eq!(doc.select_value(select), "");
        assert!(doc.selected_options(select).is_empty());
    }

    #[test]
    fn set_select_value_selects_first_match_only() {
        let mut doc = Document::new();
        let (select, [a, b, _]) = fruit_select(&mut doc);
        let dup = option(&mut doc, select, Some("b"), "Blueberry");
        doc.set_option_selected(a, true);
        assert!(doc.set_select_value(select, "b"));
        assert_eq!(doc.selected_options(select), vec![b]);
        assert!(!doc.is_selected(dup), "only the first matching option is selected");

        assert!(!doc.set_select_value(select, "zzz"));
        assert_eq!(doc.select_value(select), "", "no match clears the selection");
    }

    #[test]
    fn single_select_is_exclusive() {
        let mut doc = Document::new();
        let (select, [a, b, c]) = fruit_select(&mut doc);
        doc.set_option_selected(a, true);
        doc.set_option_selected(b, true);
        assert_eq!(doc.selected_options(select), vec![b]);

        doc.set_multiple(select, true);
        doc.set_option_selected(c, true);
        doc.set_option_selected(a, true);
        assert_eq!(doc.selected_options(select), vec![a, b, c]);
        doc.set_option_selected(b, false);
        assert_eq!(doc.selected_options(select), vec![a, c]);

        doc.set_multiple(select, false);
        assert_eq!(doc.selected_options(select), vec![a], "leaving multiple keeps the first");
    }

    #[test]
    fn collapse_whitespace_trims_and_joins() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
