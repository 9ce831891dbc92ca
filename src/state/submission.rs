//! Submission gate - the only place that talks to the network.
//!
//! Both input paths end here: raw key presses (through the matcher) and the
//! touch text field with its explicit form submit. Every attempt produces
//! exactly one outward call and clears the buffer exactly once.

use std::rc::Rc;

use tracing::debug;

use super::keyboard::KeyPress;
use super::matcher::{self, KeyAction};

// =============================================================================
// NETWORK BOUNDARY
// =============================================================================

/// Outgoing game actions.
///
/// Fire-and-forget: implementations must not block and must not panic.
/// Delivery failures are theirs to deal with.
pub trait GameServer {
    fn send_word(&self, word: &str);
    fn send_shake(&self);
}

impl<T: GameServer + ?Sized> GameServer for Rc<T> {
    fn send_word(&self, word: &str) {
        (**self).send_word(word)
    }

    fn send_shake(&self) {
        (**self).send_shake()
    }
}

/// Form submit event from the touch text field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormSubmit {
    default_prevented: bool,
}

impl FormSubmit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// =============================================================================
// GATE
// =============================================================================

/// Owns the local input buffer and the outgoing server handle.
pub struct SubmissionGate<S: GameServer> {
    server: S,
    buffer: String,
}

impl<S: GameServer> SubmissionGate<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            buffer: String::new(),
        }
    }

    /// Keystrokes since the last submission.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Run a key press through the matcher and act on the result.
    pub fn handle_key(&mut self, key: KeyPress, target: Option<&str>) -> KeyAction {
        let (buffer, action) = matcher::on_key(key, &self.buffer, target);
        self.buffer = buffer;
        self.dispatch(&action);
        action
    }

    /// Mirror the touch text field's contents into the buffer.
    pub fn set_field_text(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// Submit whatever the touch text field holds.
    pub fn submit_field(&mut self, event: &mut FormSubmit) {
        event.prevent_default();
        let word = std::mem::take(&mut self.buffer);
        debug!(word = %word, "submitting word from text field");
        self.server.send_word(&word);
    }

    /// Shake button; it is only presented while the player may shake.
    /// Returns whether a shake was sent.
    pub fn shake_button(&mut self, can_shake: bool) -> bool {
        if !can_shake {
            return false;
        }
        self.dispatch(&KeyAction::SpecialAction);
        true
    }

    /// Drop any pending keystrokes without sending them.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn dispatch(&self, action: &KeyAction) {
        match action {
            KeyAction::None => {}
            KeyAction::SubmitWord(word) => {
                debug!(word = %word, "submitting word");
                self.server.send_word(word);
            }
            KeyAction::SpecialAction => {
                debug!("sending shake");
                self.server.send_shake();
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
