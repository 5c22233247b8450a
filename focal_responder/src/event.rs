// Copyright 2025 the Focal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Federated event model.
//!
//! A [`FederatedEvent`] is the single event shape every listener sees, whatever the input
//! category. Category-specific fields live in [`EventData`].

use alloc::string::String;

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::Phase;

/// Kind of a federated event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A pointer button was pressed.
    PointerDown,
    /// A pointer button was released.
    PointerUp,
    /// A pointer moved.
    PointerMove,
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A node gained focus (target only).
    Focus,
    /// A node lost focus (target only).
    Blur,
    /// Focus entered a subtree (bubbles).
    FocusIn,
    /// Focus left a subtree (bubbles).
    FocusOut,
    /// A node was detached from its parent.
    Removed,
}

impl EventType {
    /// Whether events of this kind bubble by default.
    pub const fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur | Self::Removed)
    }

    /// Whether this is a pointer kind.
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::PointerDown | Self::PointerUp | Self::PointerMove)
    }

    /// Whether this is a keyboard kind.
    pub const fn is_keyboard(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp)
    }

    /// Whether this is one of the focus transition kinds.
    pub const fn is_focus(self) -> bool {
        matches!(
            self,
            Self::Focus | Self::Blur | Self::FocusIn | Self::FocusOut
        )
    }
}

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Control key held.
        const CTRL  = 0b0000_0010;
        /// Alt (Option) key held.
        const ALT   = 0b0000_0100;
        /// Meta (Command, Windows) key held.
        const META  = 0b0000_1000;
    }
}

/// Physical location of a key on the keyboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyLocation {
    /// Not left/right specific and not on the numpad.
    #[default]
    Standard = 0,
    /// Left-hand variant of a key (left Shift, etc).
    Left = 1,
    /// Right-hand variant of a key.
    Right = 2,
    /// On the numeric keypad.
    Numpad = 3,
}

impl KeyLocation {
    /// Convert from the DOM `KeyboardEvent.location` constant.
    pub const fn from_dom(location: u32) -> Option<Self> {
        match location {
            0 => Some(Self::Standard),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Numpad),
            _ => None,
        }
    }

    /// The DOM `KeyboardEvent.location` constant.
    pub const fn to_dom(self) -> u32 {
        self as u32
    }
}

/// Pointer payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerData {
    /// Identifier of the pointer.
    pub pointer_id: u32,
    /// Button that changed state, DOM numbering (0 = primary).
    pub button: i16,
    /// Position in surface coordinates.
    pub global: Point,
}

/// Keyboard payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardData {
    /// Logical key value, e.g. `"a"` or `"Tab"`.
    pub key: String,
    /// Physical key code, e.g. `"KeyA"` or `"Tab"`.
    pub code: String,
    /// Modifier state.
    pub modifiers: Modifiers,
    /// Auto-repeat.
    pub repeat: bool,
    /// Part of an IME composition session.
    pub is_composing: bool,
    /// Key location.
    pub location: KeyLocation,
}

impl KeyboardData {
    /// Payload with the same `key` and `code` and no modifiers.
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// Replace the modifier state.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Category-specific event payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventData {
    /// No payload (lifecycle events).
    #[default]
    None,
    /// Pointer payload.
    Pointer(PointerData),
    /// Keyboard payload.
    Keyboard(KeyboardData),
    /// Focus transition; carries no extra data.
    Focus,
}

/// An event as seen by listeners.
///
/// Routing fields (`target`, `current_target`, `path`, `phase`) are filled in by the
/// dispatching context. `default_prevented` and the propagation flags are the
/// cooperative cancellation channel between listeners and the context.
#[derive(Clone, Debug, PartialEq)]
pub struct FederatedEvent<K> {
    /// Kind.
    pub kind: EventType,
    /// Node the event is dispatched to.
    pub target: Option<K>,
    /// Node whose listeners are currently running.
    pub current_target: Option<K>,
    /// Propagation path, root first and target last.
    pub path: SmallVec<[K; 8]>,
    /// Current phase.
    pub phase: Phase,
    /// Whether the event takes part in the bubble phase.
    pub bubbles: bool,
    /// Set by [`FederatedEvent::prevent_default`].
    pub default_prevented: bool,
    /// Set by [`FederatedEvent::stop_propagation`].
    pub propagation_stopped: bool,
    /// Set by [`FederatedEvent::stop_immediate_propagation`].
    pub propagation_immediately_stopped: bool,
    /// Time stamp in milliseconds, as supplied by the input source.
    pub time_stamp: f64,
    /// Whether the event originates from real user input.
    pub is_trusted: bool,
    /// Payload.
    pub data: EventData,
}

impl<K> FederatedEvent<K> {
    /// New untargeted event of `kind`.
    pub fn new(kind: EventType, data: EventData) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            path: SmallVec::new(),
            phase: Phase::None,
            bubbles: kind.bubbles(),
            default_prevented: false,
            propagation_stopped: false,
            propagation_immediately_stopped: false,
            time_stamp: 0.0,
            is_trusted: false,
            data,
        }
    }

    /// New pointer event.
    pub fn pointer(kind: EventType, data: PointerData) -> Self {
        Self::new(kind, EventData::Pointer(data))
    }

    /// New keyboard event.
    pub fn keyboard(kind: EventType, data: KeyboardData) -> Self {
        Self::new(kind, EventData::Keyboard(data))
    }

    /// Set the time stamp.
    #[must_use]
    pub fn with_time_stamp(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Mark the event as coming from real user input.
    #[must_use]
    pub fn trusted(mut self) -> Self {
        self.is_trusted = true;
        self
    }

    /// Ask the context to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop after the listeners of the current node.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop immediately, skipping the remaining listeners of the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.propagation_immediately_stopped = true;
    }

    /// Pointer payload, if any.
    pub fn pointer_data(&self) -> Option<&PointerData> {
        match &self.data {
            EventData::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// Keyboard payload, if any.
    pub fn keyboard_data(&self) -> Option<&KeyboardData> {
        match &self.data {
            EventData::Keyboard(k) => Some(k),
            _ => None,
        }
    }

    /// Whether Shift is held (keyboard events only).
    pub fn shift_key(&self) -> bool {
        self.keyboard_data()
            .is_some_and(|k| k.modifiers.contains(Modifiers::SHIFT))
    }

    /// Copy of this event ready to be dispatched again.
    ///
    /// Routing state and propagation flags are reset. Kind, payload, time stamp, trust,
    /// and `default_prevented` carry over.
    pub fn fork(&self) -> Self
    where
        K: Clone,
    {
        Self {
            kind: self.kind,
            target: None,
            current_target: None,
            path: SmallVec::new(),
            phase: Phase::None,
            bubbles: self.bubbles,
            default_prevented: self.default_prevented,
            propagation_stopped: false,
            propagation_immediately_stopped: false,
            time_stamp: self.time_stamp,
            is_trusted: self.is_trusted,
            data: self.data.clone(),
        }
    }
}
