//! Read-only projections of a snapshot for the rendering layer.

use crate::config::{DuelConfig, InputMode};
use crate::state::{QueueTier, classify_with, matched_prefix_length};
use crate::types::{GameSnapshot, PlayerState};

/// The typed word split against its target, plus the visible queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueView {
    /// Leading part of the buffer that matches the target.
    pub typed_correct: String,
    /// Rest of the buffer after the first mismatch.
    pub typed_incorrect: String,
    /// Part of the target not yet covered by the buffer, lower-cased.
    pub untyped: String,
    /// Queued words below the one being typed, lower-cased.
    pub upcoming: Vec<String>,
    pub depth: usize,
    pub loss_length: usize,
    pub tier: QueueTier,
}

pub fn queue_view(buffer: &str, player: &PlayerState, config: &DuelConfig) -> QueueView {
    let target = player.target_word().unwrap_or("");
    let matched = matched_prefix_length(buffer, target);

    let typed_correct: String = buffer.chars().take(matched).collect();
    let typed_incorrect: String = buffer.chars().skip(matched).collect();
    let untyped = target
        .chars()
        .skip(buffer.chars().count())
        .collect::<String>()
        .to_lowercase();

    let depth = player.queue_len();
    let upcoming = if depth > 1 {
        // Touch layouts have no typing line, so the target is listed too.
        let start = match config.input_mode {
            InputMode::Keyboard => 1,
            InputMode::Touch => 0,
        };
        let end = depth.min(config.words_to_show);
        player
            .next_words
            .get(start..end.max(start))
            .unwrap_or_default()
            .iter()
            .map(|word| word.to_lowercase())
            .collect()
    } else {
        Vec::new()
    };

    QueueView {
        typed_correct,
        typed_incorrect,
        untyped,
        upcoming,
        depth,
        loss_length: config.loss_length,
        tier: classify_with(depth, config.loss_length),
    }
}

/// Status panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub is_live: bool,
    pub players_left: u32,
    pub kills: u64,
    pub right_answers: u64,
    pub wrong_answers: u64,
    pub attacker_name: Option<String>,
    pub last_target: Option<String>,
    pub last_killed: Option<String>,
    pub show_shake_button: bool,
}

pub fn hud_view(snapshot: &GameSnapshot) -> HudView {
    let player = &snapshot.player;
    HudView {
        is_live: snapshot.is_live(),
        players_left: snapshot.players_left,
        kills: player.kills,
        right_answers: player.right_answers,
        wrong_answers: player.wrong_answers,
        attacker_name: snapshot.attacker_name().map(str::to_string),
        last_target: player.last_target.clone(),
        last_killed: player.last_killed.clone(),
        show_shake_button: player.can_shake,
    }
}
