// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local filtering of the rendered option list.

use alloc::string::String;

use fxd_dom::{Document, NodeId};

use crate::config::{Filter, FilterSubject};

/// Class toggled on hidden items, headers, and the "no results" indicator.
pub const HIDDEN_CLASS: &str = "d-none";

/// Counts produced by [`apply_filter`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Items hidden by the query.
    pub hidden: usize,
    /// Items left visible.
    pub visible: usize,
}

/// Returns true if `node` is an option item of the list.
pub fn is_item(doc: &Document, node: NodeId) -> bool {
    doc.is_tag(node, "button") && doc.has_class(node, "dropdown-item")
}

/// Returns true if `node` is a group header of the list.
pub fn is_header(doc: &Document, node: NodeId) -> bool {
    doc.has_class(node, "dropdown-header")
}

/// Returns true unless `node` carries the hidden class.
pub fn is_shown(doc: &Document, node: NodeId) -> bool {
    !doc.has_class(node, HIDDEN_CLASS)
}

/// Text of `node` without decorative (`aria-hidden`) parts such as the checkmark.
pub fn visible_text(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    collect_text(doc, node, &mut out);
    out
}

fn collect_text(doc: &Document, node: NodeId, out: &mut String) {
    if let Some(text) = doc.text(node) {
        out.push_str(text);
        return;
    }
    for &child in doc.children_of(node) {
        if doc.attribute(child, "aria-hidden") != Some("true") {
            collect_text(doc, child, out);
        }
    }
}

struct Run {
    header: NodeId,
    group: String,
    visible: usize,
}

fn close_run(doc: &mut Document, run: Option<Run>) {
    if let Some(run) = run {
        doc.toggle_class(run.header, HIDDEN_CLASS, Some(run.visible == 0));
    }
}

/// Show the items of `list` that match `query` and hide the rest.
///
/// A header stays visible while at least one item of its own run (the items that
/// follow it with the same group) is visible, so repeated headers of a
/// non-contiguous group are judged separately.
pub fn apply_filter(doc: &mut Document, list: NodeId, query: &str, filter: &Filter) -> FilterSummary {
    let mut summary = FilterSummary::default();
    let mut run: Option<Run> = None;

    for node in doc.children_of(list).to_vec() {
        if is_header(doc, node) {
            close_run(doc, run.take());
            run = Some(Run {
                header: node,
                group: doc.attribute(node, "data-group").unwrap_or_default().into(),
                visible: 0,
            });
            continue;
        }
        if !is_item(doc, node) {
            continue;
        }

        let label = visible_text(doc, node);
        let show = filter.matches(query, &FilterSubject { label: &label });
        doc.toggle_class(node, HIDDEN_CLASS, Some(!show));
        if show {
            summary.visible += 1;
        } else {
            summary.hidden += 1;
        }

        let group = doc.attribute(node, "data-group").unwrap_or_default();
        if let Some(r) = run.as_mut().filter(|r| r.group == group) {
            r.visible += usize::from(show);
        } else {
            close_run(doc, run.take());
        }
    }
    close_run(doc, run);

    tracing::trace!(query, hidden = summary.hidden, visible = summary.visible, "filter applied");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(doc: &mut Document, list: NodeId, label: &str, group: &str) -> NodeId {
        let b = doc.create_element("button");
        doc.add_classes(b, "dropdown-item fxd-item");
        doc.set_attribute(b, "data-group", group);
        doc.set_text_content(b, label);
        doc.append_child(list, b);
        b
    }

    fn header(doc: &mut Document, list: NodeId, group: &str) -> NodeId {
        let h = doc.create_element("div");
        doc.add_class(h, "dropdown-header");
        doc.set_attribute(h, "data-group", group);
        doc.set_text_content(h, group);
        doc.append_child(list, h);
        h
    }

    fn list(doc: &mut Document) -> NodeId {
        let l = doc.create_element("div");
        doc.append_child(doc.root(), l);
        l
    }

    #[test]
    fn substring_query_hides_non_matching_items() {
        let mut doc = Document::new();
        let l = list(&mut doc);
        let items = ["Apple", "Banana", "Cherry"].map(|label| item(&mut doc, l, label, ""));

        let summary = apply_filter(&mut doc, l, "ba", &Filter::Substring);
        assert_eq!(summary, FilterSummary { hidden: 2, visible: 1 });
        assert!(is_shown(&doc, items[1]));
        assert!(!is_shown(&doc, items[0]) && !is_shown(&doc, items[2]));

        let summary = apply_filter(&mut doc, l, "", &Filter::Substring);
        assert_eq!(summary.visible, 3, "empty query shows everything again");
    }

    #[test]
    fn headers_follow_their_own_run() {
        let mut doc = Document::new();
        let l = list(&mut doc);
        let fruit = header(&mut doc, l, "Fruit");
        item(&mut doc, l, "Apple", "Fruit");
        let veg = header(&mut doc, l, "Veg");
        item(&mut doc, l, "Kale", "Veg");
        let fruit_again = header(&mut doc, l, "Fruit");
        item(&mut doc, l, "Banana", "Fruit");

        apply_filter(&mut doc, l, "an", &Filter::Substring);
        assert!(!is_shown(&doc, fruit), "no visible item in the first Fruit run");
        assert!(!is_shown(&doc, veg));
        assert!(is_shown(&doc, fruit_again));
    }

    #[test]
    fn ungrouped_items_end_a_run() {
        let mut doc = Document::new();
        let l = list(&mut doc);
        let g = header(&mut doc, l, "G");
        item(&mut doc, l, "one", "G");
        item(&mut doc, l, "two", "");

        apply_filter(&mut doc, l, "two", &Filter::Substring);
        assert!(!is_shown(&doc, g), "an ungrouped match does not keep the header");
    }

    #[test]
    fn decorative_children_are_not_matched() {
        let mut doc = Document::new();
        let l = list(&mut doc);
        let b = item(&mut doc, l, "Plain", "");
        let mark = doc.create_element("span");
        doc.set_attribute(mark, "aria-hidden", "true");
        doc.set_text_content(mark, "✓");
        doc.append_child(b, mark);

        assert_eq!(visible_text(&doc, b), "Plain");
        assert_eq!(apply_filter(&mut doc, l, "✓", &Filter::Substring).visible, 0);
    }
}
