//! # duel-reconcile
//!
//! Client-side reconciliation for a multiplayer typing duel.
//!
//! Raw keystrokes become word submissions against a server-authoritative
//! queue, and changes in networked counters (scores, attacks, kills, shake
//! status) become short, time-bounded visual reactions.
//!
//! ## Architecture
//!
//! Single-threaded and push-driven. The host feeds key presses and game
//! snapshots into a [`DuelView`]; nothing here blocks, polls, or spawns.
//!
//! ```text
//! KeyPress ─► matcher ─► SubmissionGate ─► GameServer (send_word / send_shake)
//! GameSnapshot ─► Reactions (6 pulses) ─► CompositeAnimationBroadcaster ─► ShellSink
//!                                     └─► OutputSlots (spark-signals)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Networked snapshot types and game constants
//! - [`state`] - Key classification, matching, submission, pulses, broadcasting
//! - [`view`] - The per-view controller and display projections
//! - [`config`] - Tunables, loadable from TOML
//! - [`clock`] - Time sources for pulse deadlines

pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod types;
pub mod view;

pub use types::*;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{DuelConfig, InputMode, PulseDurations};
pub use error::{DuelError, DuelResult};

pub use state::{
    // Keyboard
    KeyPress, KeyClass, classify_key, convert_key_event,
    KEY_BACKSPACE, KEY_ENTER, KEY_SPACE, KEY_TILDE,
    // Matching
    KeyAction, matched_prefix_length, on_key,
    // Queue
    QueueTier, classify, classify_with,
    // Submission
    GameServer, SubmissionGate, FormSubmit,
    // Reactions
    PulseKind, PulseSet, PulseState, Reactions,
    // Broadcast
    ShellSink, CompositeAnimationBroadcaster,
};

pub use view::{DuelView, HudView, OutputSlots, QueueView, hud_view, queue_view};
