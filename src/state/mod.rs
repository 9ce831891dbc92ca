//! State Module - Input and reaction state for the duel view
//!
//! - **Keyboard** - Raw key codes, classification, crossterm bridge
//! - **Matcher** - Prefix matching and per-key buffer transitions
//! - **Queue** - Queue depth tiers
//! - **Submission** - The gate between input and the game server
//! - **Reaction** - Counter-driven pulses with deadlines
//! - **Broadcast** - Composite shell class name

mod broadcast;
mod keyboard;
mod matcher;
mod queue;
mod reaction;
mod submission;

pub use broadcast::*;
pub use keyboard::*;
pub use matcher::*;
pub use queue::*;
pub use reaction::*;
pub use submission::*;
