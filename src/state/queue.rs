//! Queue depth tiers.

use crate::types::WORDS_TO_LOSE;

/// Severity of the current queue depth relative to the loss length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueTier {
    Safe,
    Warning,
    Danger,
}

impl QueueTier {
    /// Suffix used by the queue-length display class.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueTier::Safe => "Safe",
            QueueTier::Warning => "Warning",
            QueueTier::Danger => "Danger",
        }
    }
}

/// Classify against the standard loss length of 20.
pub fn classify(queue_len: usize) -> QueueTier {
    classify_with(queue_len, WORDS_TO_LOSE)
}

/// Safe up to half the loss length, Warning up to four fifths (inclusive),
/// Danger beyond. Compared exactly, without rounding the thresholds.
pub fn classify_with(queue_len: usize, loss_length: usize) -> QueueTier {
    if queue_len * 2 <= loss_length {
        QueueTier::Safe
    } else if queue_len * 5 <= loss_length * 4 {
        QueueTier::Warning
    } else {
        QueueTier::Danger
    }
}
