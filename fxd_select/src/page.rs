// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page a widget lives in: a document plus a journal of dispatched events.

use alloc::vec::Vec;

use fxd_dom::{Document, NodeId};
use fxd_responder::event::EventKind;

/// Widget notification names, dispatched on the native select.
pub mod notify {
    /// The widget was constructed.
    pub const INIT: &str = "fxd:init";
    /// The menu opened.
    pub const OPEN: &str = "fxd:open";
    /// The menu closed.
    pub const CLOSE: &str = "fxd:close";
    /// The widget was rebuilt.
    pub const REFRESH: &str = "fxd:refresh";
    /// The native select changed and the widget resynchronized.
    pub const CHANGE: &str = "fxd:change";
    /// The widget was removed.
    pub const DESTROY: &str = "fxd:destroy";
}

/// One dispatched event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    /// Event kind.
    pub kind: EventKind,
    /// Node the event was dispatched at.
    pub target: NodeId,
}

/// Ordered record of every event widgets dispatched.
///
/// This is how a host observes notifications and the native `change` events
/// a widget fires.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    events: Vec<JournalEntry>,
}

impl Journal {
    /// Record an event.
    pub fn record(&mut self, kind: EventKind, target: NodeId) {
        self.events.push(JournalEntry { kind, target });
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[JournalEntry] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<JournalEntry> {
        core::mem::take(&mut self.events)
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of recorded notifications named `name`.
    pub fn count_notifications(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Custom(n) if n == name))
            .count()
    }
}

/// A document together with its event journal.
#[derive(Debug, Default)]
pub struct Page {
    /// The document.
    pub document: Document,
    /// Events dispatched by widgets.
    pub journal: Journal,
}

impl Page {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            journal: Journal::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_counts_and_drains() {
        let mut page = Page::new();
        let root = page.document.root();
        page.journal.record(EventKind::Change, root);
        page.journal.record(EventKind::Custom(notify::OPEN), root);
        page.journal.record(EventKind::Custom(notify::OPEN), root);

        assert_eq!(page.journal.count(EventKind::Change), 1);
        assert_eq!(page.journal.count_notifications(notify::OPEN), 2);
        assert_eq!(page.journal.take_events().len(), 3);
        assert!(page.journal.events().is_empty());
    }
}
