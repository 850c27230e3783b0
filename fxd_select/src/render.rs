// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View renderer: projects the option model into the document.
//!
//! The first pass builds the wrapper, trigger, and menu and inserts them right after
//! the native select. Later passes keep those and rebuild the menu contents.

use alloc::{string::String, vec::Vec};

use fxd_dom::{Document, NodeId};

use crate::config::{Config, MultiValueStyle, OptionState, Rendered};
use crate::filter::HIDDEN_CLASS;
use crate::ids::create_id;
use crate::model::OptionRecord;

/// Handles of every generated part of one widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ui {
    /// Outer container, the next sibling of the native select.
    pub wrapper: NodeId,
    /// Row holding the trigger and the clear button.
    pub control: NodeId,
    /// The trigger.
    pub button: NodeId,
    /// Clear-selection button (clearable single-selects only).
    pub clear_button: Option<NodeId>,
    /// Dropdown menu.
    pub menu: NodeId,
    /// Option list (`role="listbox"`).
    pub list: NodeId,
    /// Search box.
    pub search_input: Option<NodeId>,
    /// Clear-query button inside the search box.
    pub search_clear_button: Option<NodeId>,
    /// "No results" indicator, present with the search box.
    pub no_results: Option<NodeId>,
    /// One item per model record, in model order.
    pub items: Vec<NodeId>,
}

fn button(doc: &mut Document, classes: &str) -> NodeId {
    let b = doc.create_element("button");
    doc.set_attribute(b, "type", "button");
    doc.add_classes(b, classes);
    b
}

fn span(doc: &mut Document, classes: &str, text: &str) -> NodeId {
    let s = doc.create_element("span");
    doc.add_classes(s, classes);
    doc.set_text_content(s, text);
    s
}

/// Replace the children of `target` with hook output.
fn place(doc: &mut Document, target: NodeId, rendered: Rendered) {
    match rendered {
        Rendered::Text(text) => doc.set_text_content(target, &text),
        Rendered::Node(node) => {
            doc.clear_children(target);
            doc.append_child(target, node);
        }
    }
}

fn build_shell(doc: &mut Document, select: NodeId, config: &Config) -> Ui {
    let wrapper = doc.create_element("div");
    doc.add_classes(wrapper, "dropdown fxd-select");
    doc.add_classes(wrapper, &config.wrapper_class);

    let control = doc.create_element("div");
    doc.add_classes(control, "d-flex align-items-center gap-1");

    let trigger = button(doc, &config.button_class);
    doc.set_attribute(trigger, "role", "combobox");
    doc.set_attribute(trigger, "aria-haspopup", "listbox");
    doc.set_attribute(trigger, "aria-expanded", "false");
    doc.append_child(control, trigger);

    let clear_button = (config.clearable && !doc.is_multiple(select)).then(|| {
        let b = button(doc, &config.clear_button_class);
        doc.set_attribute(b, "aria-label", &config.clear_button_label);
        doc.set_text_content(b, &config.clear_button_text);
        doc.append_child(control, b);
        b
    });

    let menu = doc.create_element("div");
    doc.add_classes(menu, &config.menu_class);

    doc.append_child(wrapper, control);
    doc.append_child(wrapper, menu);
    doc.insert_after(select, wrapper);

    Ui {
        wrapper,
        control,
        button: trigger,
        clear_button,
        menu,
        list: menu,
        search_input: None,
        search_clear_button: None,
        no_results: None,
        items: Vec::new(),
    }
}

fn build_search(doc: &mut Document, ui: &mut Ui, config: &Config) {
    let search_wrapper = doc.create_element("div");
    let container = doc.create_element("div");
    doc.add_classes(
        container,
        "form-control form-control-sm w-auto d-flex flex-fill align-items-center p-1 m-1",
    );

    let input = doc.create_element("input");
    doc.add_classes(input, "form-control p-0 border-0 rounded-0 shadow-none");
    doc.set_attribute(input, "placeholder", &config.filter_placeholder);
    doc.set_attribute(input, "aria-label", &config.filter_placeholder);
    doc.append_child(container, input);

    ui.search_clear_button = config.search_clearable.then(|| {
        let b = button(doc, "fxd-search-clear");
        doc.add_classes(b, &config.search_clear_button_class);
        doc.set_attribute(b, "aria-label", &config.search_clear_aria_label);
        doc.set_text_content(b, &config.search_clear_icon);
        doc.append_child(container, b);
        b
    });

    doc.append_child(search_wrapper, container);
    doc.append_child(ui.menu, search_wrapper);
    ui.search_input = Some(input);

    if config.show_divider {
        let hr = doc.create_element("hr");
        doc.add_class(hr, "m-0");
        doc.append_child(ui.menu, hr);
    }

    let no_results = doc.create_element("div");
    doc.add_classes(no_results, "no-result text-muted px-2 small");
    doc.add_class(no_results, HIDDEN_CLASS);
    doc.set_text_content(no_results, &config.no_results_text);
    doc.append_child(ui.menu, no_results);
    ui.no_results = Some(no_results);
}

fn build_item(doc: &mut Document, record: &OptionRecord, config: &Config) -> NodeId {
    let item = button(doc, "dropdown-item fxd-item");
    doc.set_text_content(item, &record.label);
    doc.set_attribute(item, "data-value", &record.value);
    doc.set_attribute(item, "data-group", record.group.as_deref().unwrap_or_default());
    doc.set_disabled(item, record.disabled);
    doc.set_attribute(item, "role", "option");
    doc.set_attribute(item, "aria-selected", if record.selected { "true" } else { "false" });
    doc.set_attribute(item, "id", &create_id("fxd-opt"));

    if let Some(hook) = &config.render_option {
        let state = OptionState {
            selected: record.selected,
            disabled: record.disabled,
        };
        if let Some(rendered) = hook(record, state, doc) {
            place(doc, item, rendered);
        }
    }

    if record.selected {
        doc.add_class(item, "is-selected");
    }

    if config.show_checkmark && !record.value.is_empty() {
        let check = span(doc, &config.checkmark_class, &config.checkmark_text);
        doc.set_attribute(check, "aria-hidden", "true");
        doc.append_child(item, check);
    }
    item
}

/// Render `model` for `select`, reusing the shell of `existing` if given.
pub fn render(
    doc: &mut Document,
    select: NodeId,
    model: &[OptionRecord],
    config: &Config,
    existing: Option<Ui>,
) -> Ui {
    let mut ui = match existing {
        Some(mut ui) => {
            doc.clear_children(ui.menu);
            ui.search_input = None;
            ui.search_clear_button = None;
            ui.no_results = None;
            ui.items.clear();
            ui
        }
        None => build_shell(doc, select, config),
    };

    let list = doc.create_element("div");
    let list_id = create_id("fxd-list");
    doc.set_attribute(list, "id", &list_id);
    doc.set_attribute(list, "role", "listbox");
    doc.set_attribute(ui.button, "aria-controls", &list_id);
    ui.list = list;

    if config.searchable {
        build_search(doc, &mut ui, config);
    }

    if let Some(height) = config.max_height.css() {
        doc.set_style(list, "overflow-y", "auto");
        doc.set_style(list, "max-height", height);
    }
    doc.append_child(ui.menu, list);

    let mut current_group: Option<&str> = None;
    for record in model {
        match record.group.as_deref() {
            Some(group) if current_group != Some(group) => {
                let header = doc.create_element("div");
                doc.add_class(header, "dropdown-header");
                doc.set_text_content(header, group);
                doc.set_attribute(header, "data-group", group);
                doc.append_child(list, header);
                current_group = Some(group);
            }
            Some(_) => {}
            None => current_group = None,
        }
        let item = build_item(doc, record, config);
        doc.append_child(list, item);
        ui.items.push(item);
    }

    update_button_label(doc, &ui, model, config, select);

    let disabled = doc.is_disabled(select);
    let parts = [Some(ui.button), ui.clear_button, ui.search_input, ui.search_clear_button];
    for part in parts.into_iter().flatten() {
        doc.set_disabled(part, disabled);
    }

    ui
}

/// Compose the trigger label from the selection.
pub fn update_button_label(
    doc: &mut Document,
    ui: &Ui,
    model: &[OptionRecord],
    config: &Config,
    select: NodeId,
) {
    let trigger = ui.button;
    if let Some(hook) = &config.render_value {
        match hook(model, select, doc) {
            Some(rendered) => place(doc, trigger, rendered),
            None => doc.set_text_content(trigger, ""),
        }
        return;
    }

    let selected: Vec<&OptionRecord> = model.iter().filter(|r| r.selected).collect();
    let Some(first) = selected.first() else {
        doc.set_text_content(trigger, &config.placeholder);
        return;
    };
    if !doc.is_multiple(select) {
        doc.set_text_content(trigger, &first.label);
        return;
    }

    // One label more than `max_display_items` is shown before summarizing.
    let limit = config.max_display_items + 1;
    let template = &config.selection_count_template;
    match config.multi_value_style {
        MultiValueStyle::Pills => {
            let container = span(doc, &config.pill_container_class, "");
            for record in selected.iter().take(limit) {
                let pill = span(doc, &config.pill_class, &record.label);
                doc.append_child(container, pill);
            }
            let remaining = selected.len().saturating_sub(limit);
            if remaining > 0 {
                let count = span(doc, &config.selection_count_class, &template(remaining));
                doc.append_child(container, count);
            }
            place(doc, trigger, Rendered::Node(container));
        }
        MultiValueStyle::Count => {
            let badge = span(doc, &config.selection_count_class, &template(selected.len()));
            place(doc, trigger, Rendered::Node(badge));
        }
        MultiValueStyle::List => {
            let text = if selected.len() > limit {
                template(selected.len() - limit)
            } else {
                selected
                    .iter()
                    .map(|r| r.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            doc.set_text_content(trigger, &text);
        }
    }
}

/// Label text of the trigger, as a host screen reader would read it.
pub fn button_text(doc: &Document, ui: &Ui) -> String {
    doc.text_content(ui.button)
}
