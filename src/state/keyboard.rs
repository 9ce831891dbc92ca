//! Keyboard Module - Raw key codes and their classification
//!
//! The duel listens to raw key codes, the same numbers a browser reports on
//! `keydown`. This module decides what a code means to the typing game and
//! bridges crossterm key events onto the same codes for terminal front-ends.
//!
//! # Recognized codes
//!
//! - ASCII letters (decoded from the code as a character)
//! - `8` backspace
//! - `13` enter and `32` space, both an explicit submit
//! - `192` tilde/backtick, the shake action
//!
//! Everything else is ignored.

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind};

// =============================================================================
// KEY CODES
// =============================================================================

pub const KEY_BACKSPACE: u32 = 8;
pub const KEY_ENTER: u32 = 13;
pub const KEY_SPACE: u32 = 32;
pub const KEY_TILDE: u32 = 192;

// =============================================================================
// TYPES
// =============================================================================

/// A single raw key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key_code: u32,
}

impl KeyPress {
    pub const fn new(key_code: u32) -> Self {
        Self { key_code }
    }

    pub const fn backspace() -> Self {
        Self::new(KEY_BACKSPACE)
    }

    pub const fn enter() -> Self {
        Self::new(KEY_ENTER)
    }

    pub const fn space() -> Self {
        Self::new(KEY_SPACE)
    }

    pub const fn tilde() -> Self {
        Self::new(KEY_TILDE)
    }

    /// Key press for an ASCII letter, reported upper-case like a keyboard does.
    pub fn letter(c: char) -> Self {
        Self::new(c.to_ascii_uppercase() as u32)
    }

    /// What this key means to the typing game.
    pub fn class(self) -> KeyClass {
        classify_key(self.key_code)
    }
}

/// Meaning of a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// An ASCII letter, already lower-cased.
    Letter(char),
    Backspace,
    /// Space or enter.
    Submit,
    /// Tilde/backtick.
    Special,
    Other,
}

/// Classify a raw key code.
///
/// Letters are detected on the decoded character with an ASCII check, so
/// non-ASCII input falls through to `Other`.
pub fn classify_key(key_code: u32) -> KeyClass {
    match key_code {
        KEY_BACKSPACE => KeyClass::Backspace,
        KEY_SPACE | KEY_ENTER => KeyClass::Submit,
        KEY_TILDE => KeyClass::Special,
        code => match char::from_u32(code) {
            Some(c) if c.is_ascii_alphabetic() => KeyClass::Letter(c.to_ascii_lowercase()),
            _ => KeyClass::Other,
        },
    }
}

// =============================================================================
// CROSSTERM CONVERSION
// =============================================================================

/// Convert a crossterm key event into a raw key press.
///
/// Release events return `None`; repeats count as presses, like held keys in a
/// browser. Keys with no meaning in the game map to code 0, which classifies
/// as `Other`.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyPress> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let code = match event.code {
        KeyCode::Char(' ') => KEY_SPACE,
        KeyCode::Char('~') | KeyCode::Char('`') => KEY_TILDE,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase() as u32,
        KeyCode::Enter => KEY_ENTER,
        KeyCode::Backspace => KEY_BACKSPACE,
        _ => 0,
    };

    Some(KeyPress::new(code))
}

// =============================================================================
// TESTS
// =============================================================================
