//! Tunables for the duel view.
//!
//! Defaults match the live game. Hosts may load overrides from TOML:
//!
//! ```toml
//! loss_length = 20
//! input_mode = "touch"
//!
//! [durations]
//! killed_ms = 2000
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DuelResult;
use crate::types::{WORDS_TO_LOSE, WORDS_TO_SHOW};

/// Which input path the view listens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Physical keyboard: raw key events drive the matcher.
    #[default]
    Keyboard,
    /// Touch device: a free-text field plus explicit form submit.
    Touch,
}

/// Window lengths for each counter-driven pulse, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseDurations {
    pub correct_ms: u64,
    pub incorrect_ms: u64,
    pub attacking_ms: u64,
    pub attacked_ms: u64,
    pub killed_ms: u64,
}

impl Default for PulseDurations {
    fn default() -> Self {
        Self {
            correct_ms: 300,
            incorrect_ms: 300,
            attacking_ms: 1000,
            attacked_ms: 1000,
            killed_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Queue depth at which the player loses.
    pub loss_length: usize,
    /// Cap on queued words handed to the queue display.
    pub words_to_show: usize,
    pub input_mode: InputMode,
    pub durations: PulseDurations,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            loss_length: WORDS_TO_LOSE,
            words_to_show: WORDS_TO_SHOW,
            input_mode: InputMode::default(),
            durations: PulseDurations::default(),
        }
    }
}

impl DuelConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> DuelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> DuelResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> DuelResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
