//! Core types for duel-reconcile.
//!
//! Snapshots of networked game state as the game-state layer hands them to us.
//! They are owned elsewhere and only ever read here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Queue depth at which a player is eliminated.
pub const WORDS_TO_LOSE: usize = 20;

/// How many queued words the queue display shows at most.
pub const WORDS_TO_SHOW: usize = 13;

// =============================================================================
// Player snapshot
// =============================================================================

/// Per-player state as last reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerState {
    /// Pending target words, front first.
    pub next_words: Vec<String>,
    pub right_answers: u64,
    pub wrong_answers: u64,
    pub kills: u64,
    pub times_attacked: u64,
    /// Player id of whoever attacked us last.
    pub last_attacker: Option<String>,
    /// Display name of whoever we attacked last.
    pub last_target: Option<String>,
    /// Display name of whoever we eliminated last.
    pub last_killed: Option<String>,
    pub can_shake: bool,
    /// Epoch milliseconds until which our screen shakes.
    pub screen_shake_until_ms: u64,
}

impl PlayerState {
    /// The word that must be typed next, if any.
    pub fn target_word(&self) -> Option<&str> {
        self.next_words.first().map(String::as_str)
    }

    /// Current queue depth.
    pub fn queue_len(&self) -> usize {
        self.next_words.len()
    }
}

/// Public info about any player in the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfo {
    pub name: Option<String>,
}

// =============================================================================
// Game snapshot
// =============================================================================

/// Everything a reconciliation pass looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSnapshot {
    pub player: PlayerState,
    pub players: HashMap<String, PlayerInfo>,
    pub players_left: u32,
    /// Countdown in milliseconds; negative once the match is live.
    pub load_time: i64,
}

impl GameSnapshot {
    /// Name of the last attacker, when the id resolves to a named player.
    pub fn attacker_name(&self) -> Option<&str> {
        let id = self.player.last_attacker.as_deref()?;
        self.players.get(id)?.name.as_deref()
    }

    /// True once the countdown has finished.
    pub fn is_live(&self) -> bool {
        self.load_time < 0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_attacker(id: Option<&str>, name: Option<&str>) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        snapshot.player.last_attacker = id.map(str::to_string);
        snapshot.players.insert(
            "p2".to_string(),
            PlayerInfo {
                name: name.map(str::to_string),
            },
        );
        snapshot
    }

    #[test]
    fn test_target_word_empty_queue() {
        let player = PlayerState::default();
        assert_eq!(player.target_word(), None);
        assert_eq!(player.queue_len(), 0);
    }

    #[test]
    fn test_target_word_is_front() {
        let player = PlayerState {
            next_words: vec!["alpha".into(), "beta".into()],
            ..Default::default()
        };
        assert_eq!(player.target_word(), Some("alpha"));
    }

    #[test]
    fn test_attacker_name_resolution() {
        assert_eq!(
            snapshot_with_attacker(Some("p2"), Some("Ada")).attacker_name(),
            Some("Ada")
        );
        assert_eq!(snapshot_with_attacker(Some("p2"), None).attacker_name(), None);
        assert_eq!(snapshot_with_attacker(Some("p9"), Some("Ada")).attacker_name(), None);
        assert_eq!(snapshot_with_attacker(None, Some("Ada")).attacker_name(), None);
    }

    #[test]
    fn test_is_live() {
        let mut snapshot = GameSnapshot::default();
        snapshot.load_time = 2500;
        assert!(!snapshot.is_live());
        snapshot.load_time = 0;
        assert!(!snapshot.is_live());
        snapshot.load_time = -1;
        assert!(snapshot.is_live());
    }
}
