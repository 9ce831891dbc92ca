//! Duel View - the view controller that ties input and reactions together.
//!
//! One `DuelView` exists per in-game view. It is created when the view
//! appears and disposed when it goes away. The host pushes everything in:
//!
//! ```text
//! key presses / text field ──► SubmissionGate ──► GameServer
//! snapshots / ticks ─────────► Reactions ──┬──► CompositeAnimationBroadcaster ──► ShellSink
//!                                          └──► attacking / attacked / killed slots
//! ```
//!
//! # Example
//!
//! ```ignore
//! use duel_reconcile::{DuelConfig, DuelView, KeyPress, MonotonicClock};
//!
//! let mut view = DuelView::new(DuelConfig::default(), server, shell, MonotonicClock::new());
//!
//! // On every snapshot from the game-state layer
//! view.reconcile(&snapshot);
//!
//! // On every keydown
//! view.on_key(KeyPress::new(key_code), &snapshot.player);
//!
//! // Periodically, so pulses expire between snapshots
//! view.tick();
//!
//! // When the view goes away
//! view.dispose();
//! ```

mod projection;

pub use projection::*;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::clock::Clock;
use crate::config::{DuelConfig, InputMode};
use crate::state::{
    CompositeAnimationBroadcaster, FormSubmit, GameServer, KeyAction, KeyPress, PulseKind,
    PulseSet, PulseState, Reactions, ShellSink, SubmissionGate,
};
use crate::types::{GameSnapshot, PlayerState};

// =============================================================================
// OUTPUT SLOTS
// =============================================================================

/// Per-pulse class name slots read by the rendering layer.
#[derive(Clone)]
pub struct OutputSlots {
    pub attacking: Signal<Option<String>>,
    pub attacked: Signal<Option<String>>,
    pub killed: Signal<Option<String>>,
}

impl OutputSlots {
    fn new() -> Self {
        Self {
            attacking: signal(None),
            attacked: signal(None),
            killed: signal(None),
        }
    }

    fn slot(&self, kind: PulseKind) -> Option<&Signal<Option<String>>> {
        match kind {
            PulseKind::Attacking => Some(&self.attacking),
            PulseKind::Attacked => Some(&self.attacked),
            PulseKind::Killed => Some(&self.killed),
            _ => None,
        }
    }

    fn write(&self, kind: PulseKind, state: PulseState) {
        let Some(slot) = self.slot(kind) else {
            return;
        };
        let value = state.label().map(str::to_string);
        if slot.get() != value {
            slot.set(value);
        }
    }

    fn clear(&self) {
        self.attacking.set(None);
        self.attacked.set(None);
        self.killed.set(None);
    }
}

// =============================================================================
// DUEL VIEW
// =============================================================================

pub struct DuelView<S: GameServer, H: ShellSink, C: Clock> {
    config: DuelConfig,
    clock: C,
    gate: SubmissionGate<S>,
    reactions: Reactions,
    broadcaster: CompositeAnimationBroadcaster<H>,
    slots: OutputSlots,
    disposed: bool,
}

impl<S: GameServer, H: ShellSink, C: Clock> DuelView<S, H, C> {
    /// Create the view state. Pushes the initial (empty) shell class name.
    pub fn new(config: DuelConfig, server: S, shell: H, clock: C) -> Self {
        let reactions = Reactions::new(&config.durations);
        let mut broadcaster = CompositeAnimationBroadcaster::new(shell);
        broadcaster.update(&reactions);

        Self {
            config,
            clock,
            gate: SubmissionGate::new(server),
            reactions,
            broadcaster,
            slots: OutputSlots::new(),
            disposed: false,
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a raw key press against the player's current target word.
    ///
    /// Ignored in touch mode, where no keyboard listener exists.
    pub fn on_key(&mut self, key: KeyPress, player: &PlayerState) -> KeyAction {
        if self.disposed || self.config.input_mode == InputMode::Touch {
            return KeyAction::None;
        }
        self.gate.handle_key(key, player.target_word())
    }

    /// The text field changed.
    pub fn on_field_change(&mut self, text: &str) {
        if !self.disposed {
            self.gate.set_field_text(text);
        }
    }

    /// The text field's form was submitted.
    pub fn on_field_submit(&mut self, event: &mut FormSubmit) {
        if self.disposed {
            event.prevent_default();
            return;
        }
        self.gate.submit_field(event);
    }

    /// The on-screen shake button was pressed.
    pub fn on_shake_button(&mut self, player: &PlayerState) -> bool {
        !self.disposed && self.gate.shake_button(player.can_shake)
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Sample a new snapshot. Returns the pulses that changed.
    pub fn reconcile(&mut self, snapshot: &GameSnapshot) -> PulseSet {
        let now = self.clock.now_ms();
        let changed = self.reactions.reconcile(snapshot, now);
        self.publish(changed);
        changed
    }

    /// Expire pulses whose deadlines have passed. Returns the pulses that changed.
    pub fn tick(&mut self) -> PulseSet {
        let now = self.clock.now_ms();
        let changed = self.reactions.tick(now);
        self.publish(changed);
        changed
    }

    fn publish(&mut self, changed: PulseSet) {
        if self.disposed || changed.is_empty() {
            return;
        }
        if changed.intersects(PulseSet::COMPOSITE) {
            self.broadcaster.update(&self.reactions);
        }
        for kind in [PulseKind::Attacking, PulseKind::Attacked, PulseKind::Killed] {
            if changed.contains(kind.flag()) {
                self.slots.write(kind, self.reactions.state(kind));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Cancel every deadline and null every output exactly once.
    ///
    /// Safe to call repeatedly; also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.reactions.cancel_all();
        self.broadcaster.teardown();
        self.slots.clear();
        self.gate.clear();
        debug!("duel view disposed");
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Keystrokes since the last submission.
    pub fn buffer(&self) -> &str {
        self.gate.buffer()
    }

    pub fn pulse(&self, kind: PulseKind) -> PulseState {
        self.reactions.state(kind)
    }

    /// How many times a pulse has been activated since creation.
    pub fn activations(&self, kind: PulseKind) -> u32 {
        self.reactions.activations(kind)
    }

    /// Last class name pushed to the shell.
    pub fn shell_class_name(&self) -> Option<&str> {
        self.broadcaster.last_pushed()
    }

    pub fn slots(&self) -> &OutputSlots {
        &self.slots
    }

    pub fn queue_view(&self, player: &PlayerState) -> QueueView {
        queue_view(self.gate.buffer(), player, &self.config)
    }

    pub fn hud_view(&self, snapshot: &GameSnapshot) -> HudView {
        hud_view(snapshot)
    }
}

impl<S: GameServer, H: ShellSink, C: Clock> Drop for DuelView<S, H, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        words: RefCell<Vec<String>>,
        shakes: RefCell<u32>,
        shell: RefCell<Vec<Option<String>>>,
    }

    impl GameServer for Recorder {
        fn send_word(&self, word: &str) {
            self.words.borrow_mut().push(word.to_string());
        }

        fn send_shake(&self) {
            *self.shakes.borrow_mut() += 1;
        }
    }

    impl ShellSink for Recorder {
        fn set_shell_class_name(&self, class_name: Option<&str>) {
            self.shell.borrow_mut().push(class_name.map(str::to_string));
        }
    }

    type TestView = DuelView<Rc<Recorder>, Rc<Recorder>, ManualClock>;

    fn setup(config: DuelConfig) -> (Rc<Recorder>, ManualClock, TestView) {
        let recorder = Rc::new(Recorder::default());
        let clock = ManualClock::new(100_000);
        let view = DuelView::new(config, recorder.clone(), recorder.clone(), clock.clone());
        (recorder, clock, view)
    }

    fn snapshot(words: &[&str]) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        snapshot.player.next_words = words.iter().map(|w| w.to_string()).collect();
        snapshot
    }

    #[test]
    fn test_initial_push_is_empty_class() {
        let (recorder, _, view) = setup(DuelConfig::default());
        assert_eq!(*recorder.shell.borrow(), vec![Some(String::new())]);
        assert_eq!(view.shell_class_name(), Some(""));
    }

    #[test]
    fn test_typing_submits_through_view() {
        let (recorder, _, mut view) = setup(DuelConfig::default());
        let snap = snapshot(&["go"]);
        view.on_key(KeyPress::letter('g'), &snap.player);
        assert_eq!(view.buffer(), "g");
        view.on_key(KeyPress::letter('o'), &snap.player);
        assert_eq!(*recorder.words.borrow(), vec!["go".to_string()]);
        assert_eq!(view.buffer(), "");
    }

    #[test]
    fn test_touch_mode_ignores_keys() {
        let config = DuelConfig {
            input_mode: InputMode::Touch,
            ..Default::default()
        };
        let (recorder, _, mut view) = setup(config);
        let snap = snapshot(&["go"]);

        assert_eq!(view.on_key(KeyPress::enter(), &snap.player), KeyAction::None);
        view.on_field_change("go");
        let mut event = FormSubmit::new();
        view.on_field_submit(&mut event);

        assert!(event.default_prevented());
        assert_eq!(*recorder.words.borrow(), vec!["go".to_string()]);
    }

    #[test]
    fn test_slots_follow_pulses() {
        let (_, clock, mut view) = setup(DuelConfig::default());
        let mut snap = snapshot(&["go"]);
        view.reconcile(&snap);

        snap.player.right_answers = 1;
        view.reconcile(&snap);
        assert_eq!(
            view.slots().attacking.get().as_deref(),
            Some("IngameView-Attacking")
        );
        assert_eq!(view.shell_class_name(), Some("App-Correct"));

        clock.advance(300);
        view.tick();
        assert_eq!(view.shell_class_name(), Some(""));
        assert!(view.slots().attacking.get().is_some());

        clock.advance(700);
        view.tick();
        assert_eq!(view.slots().attacking.get(), None);
    }

    #[test]
    fn test_shake_button_gated_by_can_shake() {
        let (recorder, _, mut view) = setup(DuelConfig::default());
        let mut snap = snapshot(&[]);
        assert!(!view.on_shake_button(&snap.player));
        snap.player.can_shake = true;
        assert!(view.on_shake_button(&snap.player));
        assert_eq!(*recorder.shakes.borrow(), 1);
    }

    #[test]
    fn test_dispose_is_final() {
        let (recorder, _, mut view) = setup(DuelConfig::default());
        let mut snap = snapshot(&["go"]);
        view.reconcile(&snap);
        snap.player.kills = 1;
        snap.player.last_killed = Some("Bob".into());
        view.reconcile(&snap);
        assert!(view.slots().killed.get().is_some());

        view.dispose();
        view.dispose();

        snap.player.kills = 2;
        snap.player.right_answers = 5;
        assert_eq!(view.reconcile(&snap), PulseSet::empty());
        assert_eq!(view.on_key(KeyPress::enter(), &snap.player), KeyAction::None);

        assert_eq!(view.slots().killed.get(), None);
        assert_eq!(view.slots().attacking.get(), None);
        assert!(recorder.words.borrow().is_empty());
        let shell = recorder.shell.borrow();
        assert_eq!(shell.iter().filter(|p| p.is_none()).count(), 1);
        assert_eq!(shell.last(), Some(&None));
    }

    #[test]
    fn test_drop_disposes() {
        let (recorder, _, view) = setup(DuelConfig::default());
        drop(view);
        assert_eq!(recorder.shell.borrow().last(), Some(&None));
    }
}
