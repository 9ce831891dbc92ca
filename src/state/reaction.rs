//! Reaction pulses - short visual reactions to networked counter changes.
//!
//! Six independent pulses, each `Idle` or `Active { label, expires_at }`:
//!
//! - **Correct / Incorrect / Attacking / Attacked / Killed** are edge-triggered.
//!   Each remembers the previous sampled counter and activates only when the
//!   counter goes up (and its extra condition holds). A new edge while active
//!   restarts the window.
//! - **Shaking** is level-triggered: active exactly while
//!   `now < screen_shake_until_ms`.
//!
//! Deadlines are plain timestamps checked on every `reconcile`/`tick`. Nothing
//! runs in the background, so cancelling is just forgetting the deadlines.

use bitflags::bitflags;
use tracing::trace;

use crate::config::PulseDurations;
use crate::types::GameSnapshot;

// =============================================================================
// PULSE KINDS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PulseKind {
    Correct,
    Incorrect,
    Attacking,
    Attacked,
    Killed,
    Shaking,
}

impl PulseKind {
    pub const ALL: [PulseKind; 6] = [
        PulseKind::Correct,
        PulseKind::Incorrect,
        PulseKind::Attacking,
        PulseKind::Attacked,
        PulseKind::Killed,
        PulseKind::Shaking,
    ];

    /// Class name handed to the rendering layer while the pulse is active.
    pub fn label(self) -> &'static str {
        match self {
            PulseKind::Correct => "App-Correct",
            PulseKind::Incorrect => "App-Incorrect",
            PulseKind::Attacking => "IngameView-Attacking",
            PulseKind::Attacked => "IngameView-Attacked",
            PulseKind::Killed => "IngameView-Killed",
            PulseKind::Shaking => "App-Shaking",
        }
    }

    pub fn flag(self) -> PulseSet {
        match self {
            PulseKind::Correct => PulseSet::CORRECT,
            PulseKind::Incorrect => PulseSet::INCORRECT,
            PulseKind::Attacking => PulseSet::ATTACKING,
            PulseKind::Attacked => PulseSet::ATTACKED,
            PulseKind::Killed => PulseSet::KILLED,
            PulseKind::Shaking => PulseSet::SHAKING,
        }
    }
}

bitflags! {
    /// A set of pulses, typically "the ones that changed this pass".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PulseSet: u8 {
        const CORRECT = 1 << 0;
        const INCORRECT = 1 << 1;
        const ATTACKING = 1 << 2;
        const ATTACKED = 1 << 3;
        const KILLED = 1 << 4;
        const SHAKING = 1 << 5;
        /// Pulses combined into the shell class name.
        const COMPOSITE = Self::CORRECT.bits() | Self::INCORRECT.bits() | Self::SHAKING.bits();
    }
}

// =============================================================================
// PULSE STATE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PulseState {
    #[default]
    Idle,
    Active {
        label: &'static str,
        expires_at: u64,
    },
}

impl PulseState {
    pub fn is_active(&self) -> bool {
        matches!(self, PulseState::Active { .. })
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            PulseState::Active { label, .. } => Some(*label),
            PulseState::Idle => None,
        }
    }

    pub fn expires_at(&self) -> Option<u64> {
        match self {
            PulseState::Active { expires_at, .. } => Some(*expires_at),
            PulseState::Idle => None,
        }
    }
}

// =============================================================================
// EDGE PULSE
// =============================================================================

/// Counter-driven pulse with previous-value tracking.
#[derive(Debug, Clone)]
pub struct EdgePulse {
    kind: PulseKind,
    duration_ms: u64,
    prev: Option<u64>,
    state: PulseState,
    activations: u32,
}

impl EdgePulse {
    pub fn new(kind: PulseKind, duration_ms: u64) -> Self {
        Self {
            kind,
            duration_ms,
            prev: None,
            state: PulseState::Idle,
            activations: 0,
        }
    }

    /// Feed one sample. The first sample only sets the baseline.
    ///
    /// Returns true if the state changed.
    pub fn sample(&mut self, value: u64, qualifies: bool, now: u64) -> bool {
        let expired = self.expire(now);
        let rose = self.prev.is_some_and(|prev| value > prev);
        self.prev = Some(value);

        if !(rose && qualifies) {
            return expired;
        }

        self.state = PulseState::Active {
            label: self.kind.label(),
            expires_at: now.saturating_add(self.duration_ms),
        };
        self.activations += 1;
        trace!(pulse = ?self.kind, value, now, "pulse activated");
        true
    }

    /// Go idle if the deadline has passed. Returns true if it did.
    pub fn expire(&mut self, now: u64) -> bool {
        match self.state {
            PulseState::Active { expires_at, .. } if now >= expires_at => {
                self.state = PulseState::Idle;
                trace!(pulse = ?self.kind, now, "pulse expired");
                true
            }
            _ => false,
        }
    }

    /// Forget the deadline. Returns true if the pulse was active.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.state).is_active()
    }

    pub fn state(&self) -> PulseState {
        self.state
    }

    /// How many times this pulse has entered `Active`.
    pub fn activations(&self) -> u32 {
        self.activations
    }
}

// =============================================================================
// LEVEL PULSE
// =============================================================================

/// The shake pulse: active while `now` is before the server's deadline.
#[derive(Debug, Clone, Default)]
pub struct LevelPulse {
    until: u64,
    state: PulseState,
    activations: u32,
}

impl LevelPulse {
    /// Take a new deadline from the snapshot and re-evaluate.
    pub fn sample(&mut self, until: u64, now: u64) -> bool {
        self.until = until;
        self.evaluate(now)
    }

    /// Re-evaluate against the last known deadline. Returns true if the state changed.
    pub fn evaluate(&mut self, now: u64) -> bool {
        let next = if now < self.until {
            PulseState::Active {
                label: PulseKind::Shaking.label(),
                expires_at: self.until,
            }
        } else {
            PulseState::Idle
        };

        if next == self.state {
            return false;
        }
        if next.is_active() && !self.state.is_active() {
            self.activations += 1;
        }
        trace!(active = next.is_active(), until = self.until, now, "shake pulse changed");
        self.state = next;
        true
    }

    pub fn cancel(&mut self) -> bool {
        self.until = 0;
        std::mem::take(&mut self.state).is_active()
    }

    pub fn state(&self) -> PulseState {
        self.state
    }

    pub fn activations(&self) -> u32 {
        self.activations
    }
}

// =============================================================================
// REACTIONS
// =============================================================================

/// The six pulses of one duel view.
#[derive(Debug, Clone)]
pub struct Reactions {
    correct: EdgePulse,
    incorrect: EdgePulse,
    attacking: EdgePulse,
    attacked: EdgePulse,
    killed: EdgePulse,
    shaking: LevelPulse,
    cancelled: bool,
}

impl Reactions {
    pub fn new(durations: &PulseDurations) -> Self {
        Self {
            correct: EdgePulse::new(PulseKind::Correct, durations.correct_ms),
            incorrect: EdgePulse::new(PulseKind::Incorrect, durations.incorrect_ms),
            attacking: EdgePulse::new(PulseKind::Attacking, durations.attacking_ms),
            attacked: EdgePulse::new(PulseKind::Attacked, durations.attacked_ms),
            killed: EdgePulse::new(PulseKind::Killed, durations.killed_ms),
            shaking: LevelPulse::default(),
            cancelled: false,
        }
    }

    /// Sample every signal from a fresh snapshot.
    ///
    /// Returns the pulses whose state changed. Always empty once cancelled.
    pub fn reconcile(&mut self, snapshot: &GameSnapshot, now: u64) -> PulseSet {
        if self.cancelled {
            return PulseSet::empty();
        }

        let player = &snapshot.player;
        let mut changed = PulseSet::empty();

        if self.correct.sample(player.right_answers, true, now) {
            changed |= PulseSet::CORRECT;
        }
        if self.incorrect.sample(player.wrong_answers, true, now) {
            changed |= PulseSet::INCORRECT;
        }
        if self.attacking.sample(player.right_answers, true, now) {
            changed |= PulseSet::ATTACKING;
        }
        let attacker_known = snapshot.attacker_name().is_some();
        if self.attacked.sample(player.times_attacked, attacker_known, now) {
            changed |= PulseSet::ATTACKED;
        }
        if self.killed.sample(player.kills, player.last_killed.is_some(), now) {
            changed |= PulseSet::KILLED;
        }
        if self.shaking.sample(player.screen_shake_until_ms, now) {
            changed |= PulseSet::SHAKING;
        }

        changed
    }

    /// Expire deadlines without a new snapshot.
    pub fn tick(&mut self, now: u64) -> PulseSet {
        if self.cancelled {
            return PulseSet::empty();
        }

        let mut changed = PulseSet::empty();
        for (pulse, flag) in [
            (&mut self.correct, PulseSet::CORRECT),
            (&mut self.incorrect, PulseSet::INCORRECT),
            (&mut self.attacking, PulseSet::ATTACKING),
            (&mut self.attacked, PulseSet::ATTACKED),
            (&mut self.killed, PulseSet::KILLED),
        ] {
            if pulse.expire(now) {
                changed |= flag;
            }
        }
        if self.shaking.evaluate(now) {
            changed |= PulseSet::SHAKING;
        }
        changed
    }

    /// Drop every deadline and stop reacting for good.
    pub fn cancel_all(&mut self) -> PulseSet {
        let mut changed = PulseSet::empty();
        for (pulse, flag) in [
            (&mut self.correct, PulseSet::CORRECT),
            (&mut self.incorrect, PulseSet::INCORRECT),
            (&mut self.attacking, PulseSet::ATTACKING),
            (&mut self.attacked, PulseSet::ATTACKED),
            (&mut self.killed, PulseSet::KILLED),
        ] {
            if pulse.cancel() {
                changed |= flag;
            }
        }
        if self.shaking.cancel() {
            changed |= PulseSet::SHAKING;
        }
        self.cancelled = true;
        changed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn state(&self, kind: PulseKind) -> PulseState {
        match kind {
            PulseKind::Correct => self.correct.state(),
            PulseKind::Incorrect => self.incorrect.state(),
            PulseKind::Attacking => self.attacking.state(),
            PulseKind::Attacked => self.attacked.state(),
            PulseKind::Killed => self.killed.state(),
            PulseKind::Shaking => self.shaking.state(),
        }
    }

    pub fn activations(&self, kind: PulseKind) -> u32 {
        match kind {
            PulseKind::Correct => self.correct.activations(),
            PulseKind::Incorrect => self.incorrect.activations(),
            PulseKind::Attacking => self.attacking.activations(),
            PulseKind::Attacked => self.attacked.activations(),
            PulseKind::Killed => self.killed.activations(),
            PulseKind::Shaking => self.shaking.activations(),
        }
    }

    /// Labels of the active pulses among `set`, in `PulseKind::ALL` order.
    pub fn active_labels(&self, set: PulseSet) -> impl Iterator<Item = &'static str> + '_ {
        PulseKind::ALL
            .into_iter()
            .filter(move |kind| set.contains(kind.flag()))
            .filter_map(move |kind| self.state(kind).label())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerInfo;

    fn reactions() -> Reactions {
        Reactions::new(&PulseDurations::default())
    }

    fn with_right(right: u64) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        snapshot.player.right_answers = right;
        snapshot
    }

    #[test]
    fn test_first_sample_is_baseline() {
        let mut pulse = EdgePulse::new(PulseKind::Correct, 300);
        assert!(!pulse.sample(5, true, 0));
        assert_eq!(pulse.state(), PulseState::Idle);
        assert_eq!(pulse.activations(), 0);
    }

    #[test]
    fn test_repeated_value_does_not_refire() {
        let mut r = reactions();
        let mut now = 1000;
        for right in [0, 1, 1, 2] {
            r.reconcile(&with_right(right), now);
            now += 1000;
        }
        assert_eq!(r.activations(PulseKind::Correct), 2);
        assert_eq!(r.activations(PulseKind::Attacking), 2);
    }

    #[test]
    fn test_window_expires() {
        let mut r = reactions();
        r.reconcile(&with_right(0), 0);
        let changed = r.reconcile(&with_right(1), 100);

        assert!(changed.contains(PulseSet::CORRECT | PulseSet::ATTACKING));
        assert_eq!(
            r.state(PulseKind::Correct),
            PulseState::Active { label: "App-Correct", expires_at: 400 }
        );

        assert_eq!(r.tick(399), PulseSet::empty());
        assert_eq!(r.tick(400), PulseSet::CORRECT);
        assert!(!r.state(PulseKind::Correct).is_active());
        assert!(r.state(PulseKind::Attacking).is_active());
        assert_eq!(r.tick(1100), PulseSet::ATTACKING);
    }

    #[test]
    fn test_edge_while_active_restarts_window() {
        let mut r = reactions();
        r.reconcile(&with_right(0), 0);
        r.reconcile(&with_right(1), 100);
        r.reconcile(&with_right(2), 250);

        assert_eq!(r.state(PulseKind::Correct).expires_at(), Some(550));
        assert_eq!(r.activations(PulseKind::Correct), 2);
        assert_eq!(r.tick(400), PulseSet::empty());
    }

    #[test]
    fn test_decrease_does_not_fire() {
        let mut r = reactions();
        r.reconcile(&with_right(5), 0);
        r.reconcile(&with_right(2), 10);
        assert_eq!(r.activations(PulseKind::Correct), 0);
        r.reconcile(&with_right(3), 20);
        assert_eq!(r.activations(PulseKind::Correct), 1);
    }

    #[test]
    fn test_incorrect_independent_of_correct() {
        let mut r = reactions();
        let mut snapshot = GameSnapshot::default();
        r.reconcile(&snapshot, 0);
        snapshot.player.wrong_answers = 1;
        let changed = r.reconcile(&snapshot, 10);

        assert_eq!(changed, PulseSet::INCORRECT);
        assert!(!r.state(PulseKind::Correct).is_active());
    }

    #[test]
    fn test_attacked_needs_named_attacker() {
        let mut r = reactions();
        let mut snapshot = GameSnapshot::default();
        snapshot.player.last_attacker = Some("p2".into());
        r.reconcile(&snapshot, 0);

        snapshot.player.times_attacked = 1;
        r.reconcile(&snapshot, 10);
        assert!(!r.state(PulseKind::Attacked).is_active());

        snapshot.players.insert("p2".into(), PlayerInfo { name: Some("Ada".into()) });
        snapshot.player.times_attacked = 2;
        r.reconcile(&snapshot, 20);
        assert_eq!(
            r.state(PulseKind::Attacked),
            PulseState::Active { label: "IngameView-Attacked", expires_at: 1020 }
        );
    }

    #[test]
    fn test_killed_needs_last_killed() {
        let mut r = reactions();
        let mut snapshot = GameSnapshot::default();
        r.reconcile(&snapshot, 0);

        snapshot.player.kills = 1;
        r.reconcile(&snapshot, 10);
        assert!(!r.state(PulseKind::Killed).is_active());

        snapshot.player.kills = 2;
        snapshot.player.last_killed = Some("Bob".into());
        r.reconcile(&snapshot, 20);
        assert_eq!(r.state(PulseKind::Killed).expires_at(), Some(1520));
    }

    #[test]
    fn test_shaking_is_level_triggered() {
        let mut r = reactions();
        let mut snapshot = GameSnapshot::default();
        snapshot.player.screen_shake_until_ms = 10_000 + 5000;

        assert_eq!(r.reconcile(&snapshot, 10_100), PulseSet::SHAKING);
        assert!(r.state(PulseKind::Shaking).is_active());
        assert_eq!(r.reconcile(&snapshot, 10_200), PulseSet::empty());

        assert_eq!(r.reconcile(&snapshot, 16_000), PulseSet::SHAKING);
        assert!(!r.state(PulseKind::Shaking).is_active());
    }

    #[test]
    fn test_shaking_expires_on_tick() {
        let mut r = reactions();
        let mut snapshot = GameSnapshot::default();
        snapshot.player.screen_shake_until_ms = 500;
        r.reconcile(&snapshot, 0);

        assert_eq!(r.tick(499), PulseSet::empty());
        assert_eq!(r.tick(500), PulseSet::SHAKING);
        assert_eq!(r.activations(PulseKind::Shaking), 1);
    }

    #[test]
    fn test_cancel_all_stops_reacting() {
        let mut r = reactions();
        r.reconcile(&with_right(0), 0);
        r.reconcile(&with_right(1), 10);

        let changed = r.cancel_all();
        assert_eq!(changed, PulseSet::CORRECT | PulseSet::ATTACKING);
        assert!(r.is_cancelled());

        assert_eq!(r.reconcile(&with_right(2), 20), PulseSet::empty());
        assert_eq!(r.tick(5000), PulseSet::empty());
        for kind in PulseKind::ALL {
            assert!(!r.state(kind).is_active());
        }
    }

    #[test]
    fn test_active_labels_filters_set() {
        let mut r = reactions();
        let mut snapshot = with_right(0);
        r.reconcile(&snapshot, 0);
        snapshot.player.right_answers = 1;
        snapshot.player.screen_shake_until_ms = 1000;
        r.reconcile(&snapshot, 10);

        let labels: Vec<_> = r.active_labels(PulseSet::COMPOSITE).collect();
        assert_eq!(labels, vec!["App-Correct", "App-Shaking"]);
    }
}
