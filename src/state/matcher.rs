//! Input matcher - keystrokes against the current target word.
//!
//! Pure functions only. The caller owns the buffer and decides what to do with
//! the returned [`KeyAction`]; see [`super::submission`].

use super::keyboard::{KeyClass, KeyPress};

/// What a key press asks the game to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    None,
    /// Submit this word attempt. May be partial or empty; the server judges it.
    SubmitWord(String),
    /// Shake an opponent.
    SpecialAction,
}

/// Count of leading characters equal under case-insensitive comparison.
///
/// Returns 0 when either side is empty. Never exceeds the shorter length.
pub fn matched_prefix_length(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x.to_lowercase().eq(y.to_lowercase()))
        .count()
}

/// Apply one key press to `buffer`.
///
/// Returns the new buffer and the resulting action. A submit always comes back
/// with an empty buffer. With no target word, letters are appended but never
/// auto-submit.
pub fn on_key(key: KeyPress, buffer: &str, target: Option<&str>) -> (String, KeyAction) {
    match key.class() {
        KeyClass::Letter(c) => {
            let mut word = String::with_capacity(buffer.len() + 1);
            word.push_str(buffer);
            word.push(c);

            match target {
                Some(target) if is_complete(&word, target) => {
                    (String::new(), KeyAction::SubmitWord(word))
                }
                _ => (word, KeyAction::None),
            }
        }
        KeyClass::Backspace => {
            let mut word = buffer.to_string();
            word.pop();
            (word, KeyAction::None)
        }
        KeyClass::Submit => (String::new(), KeyAction::SubmitWord(buffer.to_string())),
        KeyClass::Special => (buffer.to_string(), KeyAction::SpecialAction),
        KeyClass::Other => (buffer.to_string(), KeyAction::None),
    }
}

fn is_complete(word: &str, target: &str) -> bool {
    !target.is_empty() && matched_prefix_length(word, target) == target.chars().count()
}
