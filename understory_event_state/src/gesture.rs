// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input gestures: which button or key, with which modifiers, starts an
//! interaction.
//!
//! Gestures are data, not code. An interaction state machine owns a table of
//! [`InputGesture`]s (usually part of its configuration) and asks each one
//! whether an incoming pointer or key event matches.
//!
//! ## Matching
//!
//! A gesture matches when the event's button (or key) is the gesture's, and
//! every modifier the gesture requires is held. Extra held modifiers do not
//! prevent a match, so a plain primary-button "select" gesture still fires
//! while Shift is held; the caller can then read the modifiers to decide
//! *how* to select.
//!
//! ```
//! use understory_event_state::gesture::{InputGesture, Modifiers, PointerButton};
//!
//! let pan = InputGesture::pointer(PointerButton::Primary).with_modifiers(Modifiers::ALT);
//! assert!(pan.matches_pointer(PointerButton::Primary, Modifiers::ALT | Modifiers::SHIFT));
//! assert!(!pan.matches_pointer(PointerButton::Primary, Modifiers::SHIFT));
//! assert!(!pan.matches_pointer(PointerButton::Secondary, Modifiers::ALT));
//! ```

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Windows key.
        const META = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Set of pointer buttons currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PointerButtons: u8 {
        /// Primary (usually left) button.
        const PRIMARY = 1;
        /// Secondary (usually right) button.
        const SECONDARY = 1 << 1;
        /// Auxiliary (usually middle) button.
        const AUXILIARY = 1 << 2;
    }
}

/// A single pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Auxiliary (usually middle) button.
    Auxiliary,
}

impl PointerButton {
    /// The button as a one-element [`PointerButtons`] set.
    #[must_use]
    pub fn as_buttons(self) -> PointerButtons {
        match self {
            Self::Primary => PointerButtons::PRIMARY,
            Self::Secondary => PointerButtons::SECONDARY,
            Self::Auxiliary => PointerButtons::AUXILIARY,
        }
    }
}

/// Keys that can start or end a keyboard-driven interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Any character-producing key.
    Character(char),
}

/// A button or key plus the modifiers it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputGesture {
    /// A pointer button press.
    Pointer {
        /// Button that must be pressed.
        button: PointerButton,
        /// Modifiers that must be held.
        modifiers: Modifiers,
    },
    /// A key press.
    Key {
        /// Key that must be pressed.
        key: Key,
        /// Modifiers that must be held.
        modifiers: Modifiers,
    },
}

impl InputGesture {
    /// A pointer gesture with no required modifiers.
    #[must_use]
    pub const fn pointer(button: PointerButton) -> Self {
        Self::Pointer {
            button,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key gesture with no required modifiers.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns this gesture with `modifiers` required.
    #[must_use]
    pub const fn with_modifiers(self, modifiers: Modifiers) -> Self {
        match self {
            Self::Pointer { button, .. } => Self::Pointer { button, modifiers },
            Self::Key { key, .. } => Self::Key { key, modifiers },
        }
    }

    /// Modifiers this gesture requires.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        match self {
            Self::Pointer { modifiers, .. } | Self::Key { modifiers, .. } => *modifiers,
        }
    }

    /// Returns `true` if a press of `button` with `held` modifiers matches.
    #[must_use]
    pub fn matches_pointer(&self, button: PointerButton, held: Modifiers) -> bool {
        match self {
            Self::Pointer {
                button: expected,
                modifiers,
            } => *expected == button && held.contains(*modifiers),
            Self::Key { .. } => false,
        }
    }

    /// Returns `true` if a press of `key` with `held` modifiers matches.
    #[must_use]
    pub fn matches_key(&self, key: Key, held: Modifiers) -> bool {
        match self {
            Self::Key {
                key: expected,
                modifiers,
            } => *expected == key && held.contains(*modifiers),
            Self::Pointer { .. } => false,
        }
    }
}
