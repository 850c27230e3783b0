// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction controller: listener bindings, focus tracking, and event handlers.
//!
//! The widget is `CLOSED` or `OPEN`. Pointer and keyboard events arrive as
//! [`DomEvent`]s routed through the widget's [`Listeners`]; each registration carries an
//! [`Action`] naming the handler to run.

use alloc::{string::String, vec::Vec};

use fxd_dom::{Document, NodeId};
use fxd_focus::{DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, Navigation, WrapMode};
use fxd_responder::event::{DomEvent, EventKind, Key};
use fxd_responder::listeners::Listeners;

use crate::filter::{HIDDEN_CLASS, apply_filter, is_item, is_shown};
use crate::page::{Page, notify};
use crate::render::Ui;
use crate::widget::{FxdSelect, PendingLoad};

/// What a listener does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Trigger clicked: toggle the menu.
    ButtonClick,
    /// Click inside the list: activate the item under the pointer.
    ItemClick,
    /// Pointer moved over the list: focus the hovered item.
    ItemHover,
    /// Click anywhere in the document: close unless inside the widget.
    DocumentClick,
    /// The native select changed: resynchronize.
    SelectChange,
    /// The search text changed: filter or schedule a remote load.
    FilterInput,
    /// Clear-query button clicked.
    SearchClear,
    /// Key pressed anywhere inside the widget.
    KeyDown,
    /// Clear-selection button clicked.
    ClearClick,
}

/// Transient interaction state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// Menu is open.
    pub open: bool,
    /// Current search text. Not reset on close.
    pub query: String,
    /// Index into the visible, enabled items.
    pub focused_index: Option<usize>,
}

/// Register the widget's listeners.
pub fn bind(listeners: &mut Listeners<NodeId, Action>, doc: &Document, select: NodeId, ui: &Ui) {
    listeners.add(ui.button, EventKind::Click, false, Action::ButtonClick);
    listeners.add(ui.list, EventKind::Click, false, Action::ItemClick);
    listeners.add(ui.list, EventKind::MouseMove, false, Action::ItemHover);
    listeners.add(doc.root(), EventKind::Click, false, Action::DocumentClick);
    listeners.add(select, EventKind::Change, false, Action::SelectChange);
    if let Some(input) = ui.search_input {
        listeners.add(input, EventKind::Input, false, Action::FilterInput);
    }
    if let Some(clear) = ui.search_clear_button {
        listeners.add(clear, EventKind::Click, false, Action::SearchClear);
    }
    listeners.add(ui.wrapper, EventKind::KeyDown, false, Action::KeyDown);
    if let Some(clear) = ui.clear_button {
        listeners.add(clear, EventKind::Click, false, Action::ClearClick);
    }
}

/// Focus entries for the items currently shown, disabled ones included but not enabled.
fn focus_entries(doc: &Document, ui: &Ui) -> Vec<FocusEntry<NodeId>> {
    ui.items
        .iter()
        .filter(|&&item| is_shown(doc, item))
        .map(|&item| FocusEntry {
            id: item,
            order: None,
            enabled: !doc.is_disabled(item),
        })
        .collect()
}

/// Items that can take focus: shown and enabled, in list order.
pub fn focus_candidates(doc: &Document, ui: &Ui) -> Vec<NodeId> {
    FocusSpace {
        nodes: &focus_entries(doc, ui),
    }
    .candidates()
}

fn navigation(key: Key) -> Option<Navigation> {
    match key {
        Key::ArrowDown => Some(Navigation::Next),
        Key::ArrowUp => Some(Navigation::Prev),
        Key::Home => Some(Navigation::First),
        Key::End => Some(Navigation::Last),
        _ => None,
    }
}

impl FxdSelect {
    /// Focus the candidate at `index`, clamped to the candidates.
    pub(crate) fn set_focused_index(&mut self, doc: &mut Document, index: usize) {
        let candidates = focus_candidates(doc, &self.ui);
        let Some(last) = candidates.len().checked_sub(1) else {
            self.state.focused_index = None;
            doc.remove_attribute(self.ui.button, "aria-activedescendant");
            return;
        };
        let index = index.min(last);
        for &item in &self.ui.items {
            doc.remove_class(item, "active");
        }
        let focused = candidates[index];
        doc.add_class(focused, "active");
        doc.scroll_into_view(focused);
        self.state.focused_index = Some(index);
        let id: String = doc.attribute(focused, "id").unwrap_or_default().into();
        doc.set_attribute(self.ui.button, "aria-activedescendant", &id);
        tracing::trace!(index, "focus moved");
    }

    /// Focus the first selected candidate, or the first candidate.
    pub(crate) fn focus_selected_or_first(&mut self, doc: &mut Document) {
        let candidates = focus_candidates(doc, &self.ui);
        if candidates.is_empty() {
            return;
        }
        let index = candidates
            .iter()
            .position(|&item| doc.attribute(item, "aria-selected") == Some("true"))
            .unwrap_or(0);
        self.set_focused_index(doc, index);
    }

    fn select_search_text(&self, doc: &mut Document) {
        if let Some(input) = self.ui.search_input {
            doc.focus(input);
            doc.select_text(input);
        }
    }

    /// Run the handler bound to `action`.
    pub(crate) fn perform(&mut self, page: &mut Page, action: Action, event: &mut DomEvent<NodeId>) {
        tracing::trace!(?action, kind = event.kind.name(), "listener fired");
        match action {
            Action::ButtonClick => self.on_button_click(page, event),
            Action::ItemClick => self.on_item_click(page, event),
            Action::ItemHover => self.on_item_hover(page, event),
            Action::DocumentClick => {
                if !page.document.contains(self.ui.wrapper, event.target) {
                    self.close(page);
                }
            }
            Action::SelectChange => {
                self.refresh(page);
                self.notify(page, notify::CHANGE);
            }
            Action::FilterInput => self.on_filter_input(page, event),
            Action::SearchClear => self.on_search_clear(page, event),
            Action::KeyDown => self.on_key_down(page, event),
            Action::ClearClick => {
                event.prevent_default();
                self.clear(page);
            }
        }
    }

    fn on_button_click(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        if page.document.is_disabled(self.select) {
            return;
        }
        event.prevent_default();
        self.toggle(page);
        if self.state.open {
            self.focus_selected_or_first(&mut page.document);
            self.select_search_text(&mut page.document);
        }
    }

    fn item_at(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        doc.closest(target, is_item)
            .filter(|item| self.ui.items.contains(item))
    }

    /// The native option an item stands for.
    fn option_for(&self, doc: &Document, item: NodeId) -> Option<NodeId> {
        let index = self.ui.items.iter().position(|&i| i == item)?;
        let record = self.model.get(index)?;
        record
            .element
            .filter(|&el| doc.owner_select(el) == Some(self.select))
            .or_else(|| {
                doc.options_of(self.select)
                    .into_iter()
                    .find(|&o| doc.option_value(o) == record.value)
            })
    }

    fn on_item_click(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        let doc = &mut page.document;
        let Some(item) = self.item_at(doc, event.target) else {
            return;
        };
        if doc.is_disabled(self.select) || doc.is_disabled(item) {
            return;
        }
        let option = self.option_for(doc, item);

        if doc.is_multiple(self.select) {
            event.prevent_default();
            event.stop_propagation();
            if let Some(option) = option {
                let selected = doc.is_selected(option);
                doc.set_option_selected(option, !selected);
            }
            self.dispatch(page, DomEvent::change(self.select));
            self.reopen_pending = true;
        } else {
            match option {
                Some(option) => doc.set_option_selected(option, true),
                None => {
                    let value: String = doc.attribute(item, "data-value").unwrap_or_default().into();
                    doc.set_select_value(self.select, &value);
                }
            }
            self.dispatch(page, DomEvent::change(self.select));
            self.close(page);
            page.document.focus(self.ui.button);
        }
    }

    fn on_item_hover(&mut self, page: &mut Page, event: &DomEvent<NodeId>) {
        if !self.state.open {
            return;
        }
        let doc = &mut page.document;
        let Some(item) = self.item_at(doc, event.target) else {
            return;
        };
        if let Some(index) = focus_candidates(doc, &self.ui).iter().position(|&c| c == item) {
            self.set_focused_index(doc, index);
        }
    }

    fn on_filter_input(&mut self, page: &mut Page, event: &DomEvent<NodeId>) {
        let Some(input) = self.ui.search_input else {
            return;
        };
        let doc = &mut page.document;
        self.state.query = doc.value(input).into();

        if self.config.load.is_some() {
            let due = event.time_stamp.saturating_add(self.config.load_debounce);
            self.pending_load = Some(PendingLoad {
                due,
                query: self.state.query.clone(),
            });
            tracing::trace!(due, "remote load scheduled");
            return;
        }

        let summary = apply_filter(doc, self.ui.list, &self.state.query, &self.config.filter);
        if let Some(no_results) = self.ui.no_results {
            doc.toggle_class(no_results, HIDDEN_CLASS, Some(summary.visible > 0));
        }
        if self.state.open {
            self.focus_selected_or_first(doc);
        }
    }

    fn on_search_clear(&mut self, page: &mut Page, event: &DomEvent<NodeId>) {
        let Some(input) = self.ui.search_input else {
            return;
        };
        page.document.set_value(input, "");
        let input_event = DomEvent::input(input)
            .with_bubbles(false)
            .at(event.time_stamp);
        self.dispatch(page, input_event);
        self.select_search_text(&mut page.document);
    }

    fn on_key_down(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        if page.document.is_disabled(self.select) {
            return;
        }
        let Some(key) = event.key else {
            return;
        };

        if !self.state.open {
            if matches!(key, Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space) {
                event.prevent_default();
                self.open(page);
                self.focus_selected_or_first(&mut page.document);
                self.select_search_text(&mut page.document);
            }
            return;
        }

        match key {
            Key::Escape => {
                event.prevent_default();
                self.close(page);
                page.document.focus(self.ui.button);
            }
            // Focus leaves the widget; the default action stays.
            Key::Tab => self.close(page),
            Key::Enter | Key::Space => {
                event.prevent_default();
                let focused = self
                    .state
                    .focused_index
                    .and_then(|i| focus_candidates(&page.document, &self.ui).get(i).copied());
                if let Some(item) = focused {
                    self.dispatch(page, DomEvent::click(item).at(event.time_stamp));
                }
            }
            _ => {
                let Some(nav) = navigation(key) else {
                    return;
                };
                event.prevent_default();
                let doc = &mut page.document;
                let entries = focus_entries(doc, &self.ui);
                let space = FocusSpace { nodes: &entries };
                let origin = self.state.focused_index.and_then(|i| space.at(i));
                let policy = DefaultPolicy {
                    wrap: WrapMode::Clamp,
                };
                if let Some(next) = policy.next(origin, nav, &space)
                    && let Some(index) = space.position(next)
                {
                    self.set_focused_index(doc, index);
                }
            }
        }
    }
}
