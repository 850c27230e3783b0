// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads: kinds, keys, and the mutable event carried through dispatch.

/// Kind of a DOM-style event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation (`click`).
    Click,
    /// Pointer movement over a node (`mousemove`).
    MouseMove,
    /// Key press (`keydown`).
    KeyDown,
    /// Text input edited (`input`).
    Input,
    /// Form control committed a change (`change`).
    Change,
    /// Named application event, such as a widget notification.
    Custom(&'static str),
}

impl EventKind {
    /// The DOM event type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseMove => "mousemove",
            Self::KeyDown => "keydown",
            Self::Input => "input",
            Self::Change => "change",
            Self::Custom(name) => name,
        }
    }
}

/// Logical key of a keyboard event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `Enter`.
    Enter,
    /// The space bar (`" "`).
    Space,
    /// `Escape`.
    Escape,
    /// `Tab`.
    Tab,
    /// A printable character other than space.
    Character(char),
    /// Anything else.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a [`Key`].
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// An event in flight.
///
/// Handlers flip [`DomEvent::default_prevented`] and [`DomEvent::propagation_stopped`]
/// through [`DomEvent::prevent_default`] and [`DomEvent::stop_propagation`]; the code
/// driving [`dispatcher::run`](crate::dispatcher::run) turns the latter into
/// [`Outcome::Stop`](crate::types::Outcome::Stop).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomEvent<K> {
    /// Event kind.
    pub kind: EventKind,
    /// Node the event was dispatched at.
    pub target: K,
    /// Key for keyboard events.
    pub key: Option<Key>,
    /// Host clock in milliseconds when the event was created.
    pub time_stamp: u64,
    /// Whether the event takes part in the bubble phase.
    pub bubbles: bool,
    /// Set by handlers that cancel the default action.
    pub default_prevented: bool,
    /// Set by handlers that stop propagation.
    pub propagation_stopped: bool,
}

impl<K> DomEvent<K> {
    /// A bubbling event of `kind` at `target`, stamped at time zero.
    pub fn new(kind: EventKind, target: K) -> Self {
        Self {
            kind,
            target,
            key: None,
            time_stamp: 0,
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A `click`.
    pub fn click(target: K) -> Self {
        Self::new(EventKind::Click, target)
    }

    /// A `mousemove`.
    pub fn mouse_move(target: K) -> Self {
        Self::new(EventKind::MouseMove, target)
    }

    /// A `keydown` for `key`.
    pub fn key_down(target: K, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    /// A bubbling `input`, as produced by typing into a field.
    pub fn input(target: K) -> Self {
        Self::new(EventKind::Input, target)
    }

    /// A bubbling `change`.
    pub fn change(target: K) -> Self {
        Self::new(EventKind::Change, target)
    }

    /// A bubbling named event.
    pub fn custom(name: &'static str, target: K) -> Self {
        Self::new(EventKind::Custom(name), target)
    }

    /// Set the timestamp.
    #[must_use]
    pub fn at(mut self, time_stamp: u64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Set whether the event bubbles.
    #[must_use]
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Cancel the default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation once the current listener returns.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_from_dom_names() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Character('a'));
        assert_eq!(Key::from_dom("ä"), Key::Character('ä'));
        assert_eq!(Key::from_dom("F5"), Key::Other);
    }

    #[test]
    fn builders_set_fields() {
        let mut ev = DomEvent::key_down(7_u32, Key::Enter).at(250).with_bubbles(false);
        assert_eq!(ev.kind, EventKind::KeyDown);
        assert_eq!(ev.key, Some(Key::Enter));
        assert_eq!(ev.time_stamp, 250);
        assert!(!ev.bubbles);
        ev.prevent_default();
        ev.stop_propagation();
        assert!(ev.default_prevented && ev.propagation_stopped);
        assert_eq!(EventKind::Custom("fxd:open").name(), "fxd:open");
    }
}
