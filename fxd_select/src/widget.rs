// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget facade.

use alloc::{string::String, vec::Vec};
use core::future::Future;
use core::task::{Context, Poll, Waker};

use fxd_dom::{Document, NodeId};
use fxd_responder::adapters::dom::router;
use fxd_responder::dispatcher;
use fxd_responder::event::DomEvent;
use fxd_responder::listeners::Listeners;
use fxd_responder::types::Outcome;

use crate::config::{Config, LoadFuture, LoadReply};
use crate::controller::{Action, WidgetState, bind};
use crate::env::warn_if_missing_bootstrap;
use crate::error::Error;
use crate::filter::HIDDEN_CLASS;
use crate::model::{OptionData, OptionRecord, build_model, normalize_options, sync_select_with_model};
use crate::page::{Page, notify};
use crate::render::{Ui, render};

/// A remote load waiting for its debounce to expire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingLoad {
    pub(crate) due: u64,
    pub(crate) query: String,
}

struct InFlight {
    token: u64,
    query: String,
    future: LoadFuture,
}

/// A searchable dropdown enhancing one native `select`.
///
/// The native select stays the source of truth: selecting in the dropdown writes to
/// the select and fires its `change` event, and any `change` on the select (from the
/// widget or from elsewhere) rebuilds the dropdown.
///
/// All operations take the [`Page`] explicitly. Time only advances through event
/// timestamps and [`FxdSelect::tick`].
pub struct FxdSelect {
    pub(crate) select: NodeId,
    pub(crate) config: Config,
    pub(crate) model: Vec<OptionRecord>,
    pub(crate) ui: Ui,
    pub(crate) state: WidgetState,
    pub(crate) listeners: Listeners<NodeId, Action>,
    pub(crate) pending_load: Option<PendingLoad>,
    in_flight: Vec<InFlight>,
    latest_token: u64,
    pub(crate) reopen_pending: bool,
    clock: u64,
    destroyed: bool,
}

impl core::fmt::Debug for FxdSelect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FxdSelect")
            .field("select", &self.select)
            .field("state", &self.state)
            .field("options", &self.model.len())
            .field("listeners", &self.listeners.len())
            .field("pending_load", &self.pending_load)
            .field("in_flight", &self.in_flight.len())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

/// Replace the select's options with `data`.
///
/// Entries without an explicit `selected` keep the select's current selection.
fn write_options(doc: &mut Document, select: NodeId, data: &[OptionData]) {
    let records = normalize_options(data, doc, select);
    sync_select_with_model(doc, select, &records);
}

fn validate(doc: &Document, select: NodeId) -> Result<(), Error> {
    if !doc.is_alive(select) {
        return Err(Error::MissingElement);
    }
    match doc.tag(select) {
        Some("select") => Ok(()),
        Some(tag) => Err(Error::NotSelect { tag: tag.into() }),
        None if select == doc.root() => Err(Error::NotSelect {
            tag: "#document".into(),
        }),
        None => Err(Error::NotSelect { tag: "#text".into() }),
    }
}

impl FxdSelect {
    /// Enhance `select`.
    ///
    /// Builds the model, renders the dropdown right after the select, hides the
    /// select, and dispatches `fxd:init`. When `config.data` is set, the data is
    /// moved into the select, which owns the options and their selection from then
    /// on; [`FxdSelect::config`] reports no data afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::MissingElement`] if `select` is stale, [`Error::NotSelect`] if it is
    /// not a `select` element.
    pub fn new(page: &mut Page, select: NodeId, mut config: Config) -> Result<Self, Error> {
        let doc = &mut page.document;
        validate(doc, select)?;

        if let Some(data) = config.data.take() {
            write_options(doc, select, &data);
        }
        let model = build_model(doc, select, &config);
        let ui = render(doc, select, &model, &config, None);

        let mut widget = Self {
            select,
            config,
            model,
            ui,
            state: WidgetState::default(),
            listeners: Listeners::new(),
            pending_load: None,
            in_flight: Vec::new(),
            latest_token: 0,
            reopen_pending: false,
            clock: 0,
            destroyed: false,
        };
        bind(&mut widget.listeners, doc, select, &widget.ui);
        doc.add_class(select, HIDDEN_CLASS);

        if widget.config.warn_on_missing_bootstrap {
            warn_if_missing_bootstrap(doc, widget.config.bootstrap_major);
        }

        tracing::debug!(
            options = widget.model.len(),
            multiple = doc.is_multiple(select),
            "fxd-select constructed"
        );
        widget.notify(page, notify::INIT);
        Ok(widget)
    }

    /// The enhanced native select.
    pub fn select(&self) -> NodeId {
        self.select
    }

    /// Handles of the generated view.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// The current option model.
    pub fn model(&self) -> &[OptionRecord] {
        &self.model
    }

    /// The widget configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true while the menu is open.
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// The current search text.
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Index of the focused item among the visible, enabled items.
    pub fn focused_index(&self) -> Option<usize> {
        self.state.focused_index
    }

    /// Returns true once [`FxdSelect::destroy`] ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns true while a remote load is debouncing or awaiting its reply.
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some() || !self.in_flight.is_empty()
    }

    // --- event plumbing ---

    /// Route an event through this widget's listeners.
    fn route(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        if event.propagation_stopped {
            return;
        }
        let seq = router(&page.document).dispatch_for(event.target, event.bubbles);
        dispatcher::run(&seq, event, |step, ev| {
            for (id, action) in self.listeners.matching(step.node, ev.kind, step.phase) {
                if self.listeners.is_registered(id) {
                    self.perform(page, action, ev);
                }
            }
            if ev.propagation_stopped {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
    }

    /// Dispatch an event originating from the widget: journal it, then route it.
    pub(crate) fn dispatch(&mut self, page: &mut Page, mut event: DomEvent<NodeId>) {
        if event.time_stamp == 0 {
            event.time_stamp = self.clock;
        }
        page.journal.record(event.kind, event.target);
        self.route(page, &mut event);
    }

    pub(crate) fn notify(&mut self, page: &mut Page, name: &'static str) {
        self.dispatch(page, DomEvent::custom(name, self.select));
    }

    /// Feed a host event (click, key press, typing) to the widget.
    ///
    /// Handlers may call [`DomEvent::prevent_default`] and
    /// [`DomEvent::stop_propagation`] on `event`. Does nothing after destroy.
    pub fn handle_event(&mut self, page: &mut Page, event: &mut DomEvent<NodeId>) {
        if self.destroyed {
            return;
        }
        self.clock = self.clock.max(event.time_stamp);
        self.route(page, event);
    }

    // --- open state ---

    fn sync_open_state(&mut self, doc: &mut Document, open: bool) {
        self.state.open = open;
        doc.toggle_class(self.ui.wrapper, "show", Some(open));
        doc.toggle_class(self.ui.menu, "show", Some(open));
        doc.set_attribute(self.ui.button, "aria-expanded", if open { "true" } else { "false" });
        if !open {
            doc.remove_attribute(self.ui.button, "aria-activedescendant");
            self.state.focused_index = None;
        }
    }

    /// Open the menu. Does nothing if it is already open.
    pub fn open(&mut self, page: &mut Page) {
        if self.state.open || self.destroyed {
            return;
        }
        self.sync_open_state(&mut page.document, true);
        self.notify(page, notify::OPEN);
    }

    /// Close the menu. Does nothing if it is already closed.
    pub fn close(&mut self, page: &mut Page) {
        if !self.state.open || self.destroyed {
            return;
        }
        self.sync_open_state(&mut page.document, false);
        self.notify(page, notify::CLOSE);
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self, page: &mut Page) {
        if self.state.open {
            self.close(page);
        } else {
            self.open(page);
        }
    }

    // --- lifecycle ---

    /// Rebuild the model and the view from the select.
    ///
    /// Keeps the open state and the search text. An active query is re-applied to
    /// the new list when filtering locally; with a remote loader the text is only
    /// restored. An open menu keeps its focus position, clamped to the new list.
    pub fn refresh(&mut self, page: &mut Page) {
        if self.destroyed {
            return;
        }
        let was_open = self.state.open;
        let focus = self.state.focused_index;
        let doc = &mut page.document;

        self.listeners.clear();
        self.model = build_model(doc, self.select, &self.config);
        self.ui = render(doc, self.select, &self.model, &self.config, Some(self.ui.clone()));
        bind(&mut self.listeners, doc, self.select, &self.ui);
        self.sync_open_state(doc, was_open);

        if !self.state.query.is_empty()
            && let Some(input) = self.ui.search_input
        {
            doc.set_value(input, &self.state.query);
            if self.config.load.is_none() {
                self.dispatch(page, DomEvent::input(input).with_bubbles(false));
            }
        }
        if was_open && let Some(index) = focus {
            self.set_focused_index(&mut page.document, index);
        }

        tracing::debug!(options = self.model.len(), open = was_open, "fxd-select refreshed");
        self.notify(page, notify::REFRESH);
    }

    /// Remove the view, unbind every listener, and show the native select again.
    ///
    /// The widget ignores events and ticks afterwards.
    pub fn destroy(&mut self, page: &mut Page) {
        if self.destroyed {
            return;
        }
        self.listeners.clear();
        self.pending_load = None;
        self.in_flight.clear();
        page.document.remove(self.ui.wrapper);
        page.document.remove_class(self.select, HIDDEN_CLASS);
        tracing::debug!("fxd-select destroyed");
        self.notify(page, notify::DESTROY);
        self.destroyed = true;
    }

    // --- value ---

    /// The select's value.
    pub fn get_value(&self, doc: &Document) -> String {
        doc.select_value(self.select)
    }

    /// Set the select's value and fire `change`.
    pub fn set_value(&mut self, page: &mut Page, value: &str) {
        page.document.set_select_value(self.select, value);
        self.dispatch(page, DomEvent::change(self.select));
    }

    /// Deselect everything (multi-select) or set the empty value (single-select),
    /// then fire `change`.
    pub fn clear(&mut self, page: &mut Page) {
        let doc = &mut page.document;
        if doc.is_multiple(self.select) {
            for option in doc.selected_options(self.select) {
                doc.set_option_selected(option, false);
            }
        } else {
            doc.set_select_value(self.select, "");
        }
        self.dispatch(page, DomEvent::change(self.select));
    }

    /// Replace the options with `data` and refresh.
    ///
    /// Entries without an explicit `selected` keep the current selection. The data
    /// is written into the select, so later refreshes read it back from there.
    pub fn set_data(&mut self, page: &mut Page, data: &[OptionData]) {
        if self.destroyed {
            return;
        }
        write_options(&mut page.document, self.select, data);
        self.refresh(page);
    }

    // --- clock ---

    /// Advance the widget's clock to `now` (milliseconds).
    ///
    /// Starts a debounced remote load once it is due, polls loads in flight, and
    /// runs the re-open scheduled by a multi-select activation.
    pub fn tick(&mut self, page: &mut Page, now: u64) {
        if self.destroyed {
            return;
        }
        self.clock = self.clock.max(now);

        if let Some(pending) = self.pending_load.take_if(|p| p.due <= now)
            && let Some(loader) = &self.config.load
        {
            self.latest_token += 1;
            tracing::debug!(token = self.latest_token, query = %pending.query, "remote load started");
            self.in_flight.push(InFlight {
                token: self.latest_token,
                future: loader.load(&pending.query),
                query: pending.query,
            });
        }

        let mut cx = Context::from_waker(Waker::noop());
        let mut ready = Vec::new();
        self.in_flight.retain_mut(|load| match load.future.as_mut().poll(&mut cx) {
            Poll::Ready(reply) => {
                ready.push((load.token, core::mem::take(&mut load.query), reply));
                false
            }
            Poll::Pending => true,
        });
        for (token, query, reply) in ready {
            self.apply_reply(page, token, query, reply);
        }

        if core::mem::take(&mut self.reopen_pending) {
            self.open(page);
        }
    }

    fn apply_reply(&mut self, page: &mut Page, token: u64, query: String, reply: LoadReply) {
        if token < self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "stale remote reply discarded");
            return;
        }
        let Some(data) = reply.into_options() else {
            tracing::debug!(token, "malformed remote reply ignored");
            return;
        };
        tracing::debug!(token, options = data.len(), "remote reply applied");

        write_options(&mut page.document, self.select, &data);
        self.refresh(page);
        if let Some(input) = self.ui.search_input {
            page.document.set_value(input, &query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::page_with;
    use crate::model::OptionData;
    use alloc::{boxed::Box, rc::Rc, vec, vec::Vec};
    use core::cell::RefCell;
    use core::future;
    use core::pin::Pin;
    use fxd_responder::event::EventKind;
    use serde_json::json;

    fn fruits() -> Vec<OptionData> {
        vec![
            OptionData::new("a").label("Apple"),
            OptionData::new("b").label("Banana"),
            OptionData::new("c").label("Cherry"),
        ]
    }

    #[test]
    fn construction_hides_select_and_inserts_one_wrapper() {
        let (page, w) = page_with(fruits(), false, Config::default());
        let doc = &page.document;
        assert!(doc.has_class(w.select(), HIDDEN_CLASS));
        let siblings = doc.children_of(doc.root());
        assert_eq!(siblings, [w.select(), w.ui().wrapper]);
        assert_eq!(page.journal.count_notifications(notify::INIT), 1);
        assert_eq!(page.journal.events()[0].target, w.select());
    }

    #[test]
    fn construction_rejects_non_selects() {
        let mut page = Page::new();
        let div = page.document.create_element("div");
        let text = page.document.create_text("x");
        let root = page.document.root();
        let err = FxdSelect::new(&mut page, div, Config::default()).unwrap_err();
        assert_eq!(err, Error::NotSelect { tag: "div".into() });
        assert_eq!(
            FxdSelect::new(&mut page, text, Config::default()).unwrap_err(),
            Error::NotSelect { tag: "#text".into() }
        );
        assert_eq!(
            FxdSelect::new(&mut page, root, Config::default()).unwrap_err(),
            Error::NotSelect {
                tag: "#document".into()
            }
        );
        page.document.remove(div);
        assert_eq!(
            FxdSelect::new(&mut page, div, Config::default()).unwrap_err(),
            Error::MissingElement
        );
        assert!(page.journal.events().is_empty());
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        w.open(&mut page);
        w.open(&mut page);
        assert!(w.is_open());
        assert!(page.document.has_class(w.ui().menu, "show"));
        assert_eq!(page.document.attribute(w.ui().button, "aria-expanded"), Some("true"));
        assert_eq!(page.journal.count_notifications(notify::OPEN), 1);

        w.close(&mut page);
        w.close(&mut page);
        assert!(!w.is_open());
        assert!(!page.document.has_class(w.ui().wrapper, "show"));
        assert_eq!(page.journal.count_notifications(notify::CLOSE), 1);

        w.toggle(&mut page);
        assert!(w.is_open());
    }

    #[test]
    fn disabled_control_never_opens_from_the_trigger() {
        let mut page = Page::new();
        let select = page.document.create_element("select");
        page.document.set_disabled(select, true);
        let root = page.document.root();
        page.document.append_child(root, select);
        let mut w = FxdSelect::new(&mut page, select, Config::default()).unwrap();

        let mut click = DomEvent::click(w.ui().button);
        w.handle_event(&mut page, &mut click);
        assert!(!w.is_open());
        assert!(!click.default_prevented);
        assert!(page.document.is_disabled(w.ui().button));
    }

    #[test]
    fn clear_empties_value_and_fires_change() {
        let data = vec![OptionData::new("a"), OptionData::new("b").selected(true)];
        let config = Config {
            clearable: true,
            ..Config::default()
        };
        let (mut page, mut w) = page_with(data, false, config);
        assert_eq!(w.get_value(&page.document), "b");
        w.clear(&mut page);
        assert_eq!(w.get_value(&page.document), "");
        assert_eq!(page.journal.count(EventKind::Change), 1);
        assert_eq!(
            crate::render::button_text(&page.document, w.ui()),
            "Select...",
            "the change resynchronized the trigger"
        );
    }

    #[test]
    fn clear_deselects_every_option_of_a_multi_select() {
        let data = vec![
            OptionData::new("a").selected(true),
            OptionData::new("b").selected(true),
        ];
        let (mut page, mut w) = page_with(data, true, Config::default());
        w.clear(&mut page);
        assert!(page.document.selected_options(w.select()).is_empty());
        assert!(w.model().iter().all(|r| !r.selected));
    }

    #[test]
    fn set_value_fires_change_and_refreshes() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        w.set_value(&mut page, "b");
        assert_eq!(w.get_value(&page.document), "b");
        assert_eq!(page.journal.count(EventKind::Change), 1);
        assert_eq!(page.journal.count_notifications(notify::REFRESH), 1);
        assert_eq!(page.journal.count_notifications(notify::CHANGE), 1);
        assert!(w.model()[1].selected);
    }

    #[test]
    fn external_change_resynchronizes() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        let select = w.select();
        let option = page.document.create_element("option");
        page.document.set_attribute(option, "value", "d");
        page.document.set_text_content(option, "Date");
        page.document.append_child(select, option);

        w.handle_event(&mut page, &mut DomEvent::change(select));
        assert_eq!(w.model().len(), 4);
        assert_eq!(w.ui().items.len(), 4);
        assert_eq!(page.journal.count_notifications(notify::CHANGE), 1);
    }

    #[test]
    fn refresh_keeps_open_state_query_and_focus() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        w.open(&mut page);
        let input = w.ui().search_input.unwrap();
        page.document.set_value(input, "an");
        w.handle_event(&mut page, &mut DomEvent::input(input));
        assert_eq!(w.focused_index(), Some(0));

        w.refresh(&mut page);
        assert!(w.is_open());
        let input = w.ui().search_input.unwrap();
        assert_eq!(page.document.value(input), "an");
        let shown = w
            .ui()
            .items
            .iter()
            .filter(|&&i| crate::filter::is_shown(&page.document, i))
            .count();
        assert_eq!(shown, 1, "the query is re-applied to the new list");
        assert_eq!(w.focused_index(), Some(0));
        assert_eq!(page.journal.count_notifications(notify::REFRESH), 1);
    }

    #[test]
    fn destroy_restores_the_select() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        let wrapper = w.ui().wrapper;
        let button = w.ui().button;
        w.destroy(&mut page);

        assert!(!page.document.is_alive(wrapper));
        assert!(!page.document.has_class(w.select(), HIDDEN_CLASS));
        assert_eq!(page.journal.count_notifications(notify::DESTROY), 1);
        assert!(w.is_destroyed());

        w.handle_event(&mut page, &mut DomEvent::click(button));
        w.open(&mut page);
        assert!(!w.is_open());
    }

    #[test]
    fn configured_data_populates_the_select() {
        let mut page = Page::new();
        let select = page.document.create_element("select");
        let root = page.document.root();
        page.document.append_child(root, select);
        let config = Config::default().with_data(fruits());
        let w = FxdSelect::new(&mut page, select, config).unwrap();
        assert_eq!(page.document.options_of(select).len(), 3);
        assert!(w.model().iter().all(|r| r.element.is_some()));
    }

    fn data_select(page: &mut Page, data: Vec<OptionData>, multiple: bool) -> FxdSelect {
        let select = page.document.create_element("select");
        page.document.set_multiple(select, multiple);
        let root = page.document.root();
        page.document.append_child(root, select);
        FxdSelect::new(page, select, Config::default().with_data(data)).unwrap()
    }

    #[test]
    fn configured_selection_yields_to_the_user() {
        let mut page = Page::new();
        let data = vec![
            OptionData::new("a").label("Apple").selected(true),
            OptionData::new("b").label("Banana"),
        ];
        let mut w = data_select(&mut page, data, false);
        assert!(w.config().data.is_none(), "the select owns the options");

        w.open(&mut page);
        let banana = w.ui().items[1];
        w.handle_event(&mut page, &mut DomEvent::click(banana));

        assert_eq!(w.get_value(&page.document), "b");
        assert_eq!(crate::render::button_text(&page.document, w.ui()), "Banana");
        let selected: Vec<bool> = w.model().iter().map(|r| r.selected).collect();
        assert_eq!(selected, [false, true]);
        assert_eq!(page.document.attribute(w.ui().items[0], "aria-selected"), Some("false"));
    }

    #[test]
    fn configured_duplicates_toggle_independently() {
        let mut page = Page::new();
        let data = vec![
            OptionData::new("x").label("First"),
            OptionData::new("x").label("Second"),
        ];
        let mut w = data_select(&mut page, data, true);
        let native = |page: &Page, w: &FxdSelect| -> Vec<bool> {
            page.document
                .options_of(w.select())
                .iter()
                .map(|&o| page.document.is_selected(o))
                .collect()
        };

        let second = w.ui().items[1];
        w.handle_event(&mut page, &mut DomEvent::click(second));
        assert_eq!(native(&page, &w), [false, true]);
        let model: Vec<bool> = w.model().iter().map(|r| r.selected).collect();
        assert_eq!(model, [false, true], "the model mirrors the select");

        let second = w.ui().items[1];
        w.handle_event(&mut page, &mut DomEvent::click(second));
        assert_eq!(native(&page, &w), [false, false], "the same option toggles back");
    }

    #[test]
    fn set_data_swaps_options_and_keeps_selection() {
        let (mut page, mut w) = page_with(fruits(), false, Config::default());
        w.set_value(&mut page, "b");
        let data = [
            OptionData::new("b").label("Blueberry"),
            OptionData::new("d").label("Date"),
        ];
        w.set_data(&mut page, &data);

        assert_eq!(page.document.options_of(w.select()).len(), 2);
        assert_eq!(w.get_value(&page.document), "b");
        assert_eq!(crate::render::button_text(&page.document, w.ui()), "Blueberry");
    }

    fn type_query(page: &mut Page, w: &mut FxdSelect, text: &str, at: u64) {
        let input = w.ui().search_input.unwrap();
        page.document.set_value(input, text);
        w.handle_event(page, &mut DomEvent::input(input).at(at));
    }

    #[test]
    fn remote_load_is_debounced_and_replaces_options() {
        let calls = Rc::new(RefCell::new(Vec::<String>::new()));
        let seen = calls.clone();
        let config = Config::default().with_load(move |query: &str| {
            seen.borrow_mut().push(query.into());
            let label = alloc::format!("Result for {query}");
            future::ready(LoadReply::from(vec![OptionData::new("r").label(label)]))
        });
        let (mut page, mut w) = page_with(fruits(), false, config);
        w.open(&mut page);

        type_query(&mut page, &mut w, "b", 100);
        type_query(&mut page, &mut w, "ba", 200);
        w.tick(&mut page, 300);
        assert!(calls.borrow().is_empty(), "debounce restarts on each keystroke");
        assert!(w.is_loading());
        assert_eq!(w.ui().items.len(), 3, "no local filtering in remote mode");

        w.tick(&mut page, 450);
        assert_eq!(*calls.borrow(), ["ba"]);
        assert!(!w.is_loading());
        assert_eq!(w.model().len(), 1);
        assert_eq!(page.document.options_of(w.select()).len(), 1);
        assert_eq!(
            page.document.value(w.ui().search_input.unwrap()),
            "ba",
            "search text survives the re-render"
        );
        assert!(w.is_open());
        assert_eq!(page.journal.count_notifications(notify::REFRESH), 1);
    }

    #[test]
    fn malformed_remote_reply_is_ignored() {
        let config = Config::default().with_load(|_: &str| future::ready(LoadReply::from(json!({"oops": 1}))));
        let (mut page, mut w) = page_with(fruits(), false, config);
        type_query(&mut page, &mut w, "x", 0);
        w.tick(&mut page, 1_000);
        assert_eq!(w.model().len(), 3);
        assert_eq!(page.journal.count_notifications(notify::REFRESH), 0);
    }

    #[test]
    fn remote_reply_outlives_configured_data() {
        let mut page = Page::new();
        let select = page.document.create_element("select");
        let root = page.document.root();
        page.document.append_child(root, select);
        let config = Config::default()
            .with_data(fruits())
            .with_load(|_: &str| future::ready(LoadReply::from(vec![OptionData::new("z").label("Zucchini")])));
        let mut w = FxdSelect::new(&mut page, select, config).unwrap();

        type_query(&mut page, &mut w, "z", 0);
        w.tick(&mut page, 1_000);
        assert_eq!(w.model().len(), 1);

        w.refresh(&mut page);
        assert_eq!(w.model()[0].label, "Zucchini", "a rebuild keeps the loaded options");
    }

    /// A future that resolves once its shared slot is filled.
    struct Slot(Rc<RefCell<Option<LoadReply>>>);

    impl Future for Slot {
        type Output = LoadReply;
        fn poll(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<LoadReply> {
            match self.0.borrow_mut().take() {
                Some(reply) => Poll::Ready(reply),
                None => Poll::Pending,
            }
        }
    }

    #[test]
    fn stale_remote_reply_is_discarded() {
        let slots: Rc<RefCell<Vec<Rc<RefCell<Option<LoadReply>>>>>> = Rc::default();
        let registry = slots.clone();
        let loader = move |_: &str| -> LoadFuture {
            let slot = Rc::new(RefCell::new(None));
            registry.borrow_mut().push(slot.clone());
            Box::pin(Slot(slot))
        };
        let config = Config {
            load: Some(Box::new(loader)),
            load_debounce: 10,
            ..Config::default()
        };
        let (mut page, mut w) = page_with(fruits(), false, config);

        type_query(&mut page, &mut w, "old", 0);
        w.tick(&mut page, 10);
        type_query(&mut page, &mut w, "new", 20);
        w.tick(&mut page, 30);
        assert_eq!(slots.borrow().len(), 2);

        let reply = |value: &str| Some(LoadReply::from(vec![OptionData::new(value)]));
        *slots.borrow()[1].borrow_mut() = reply("fresh");
        w.tick(&mut page, 40);
        assert_eq!(w.model()[0].value, "fresh");

        *slots.borrow()[0].borrow_mut() = reply("stale");
        w.tick(&mut page, 50);
        assert_eq!(w.model()[0].value, "fresh", "older replies never overwrite newer ones");
        assert!(!w.is_loading());
    }
}
