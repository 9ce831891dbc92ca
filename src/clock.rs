//! Time sources for pulse deadlines.
//!
//! Server timestamps (`screen_shake_until_ms`) are epoch milliseconds, so every
//! clock here reports epoch milliseconds. `MonotonicClock` anchors an `Instant`
//! to the wall clock once and never goes backwards afterwards.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock anchored to the wall clock at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor: Instant,
    anchor_epoch_ms: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        let anchor_epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            anchor: Instant::now(),
            anchor_epoch_ms,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.anchor_epoch_ms + self.anchor.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
