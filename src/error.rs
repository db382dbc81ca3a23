//! Error types used by the slotstream internals.
//!
//! Producer and consumer errors are user-chosen (`E`) and pass through the
//! adapter unmodified. The only error the crate defines itself is
//! [`SequenceError`], raised when the slot queue's own invariants are broken.
//!
//! Like every error here it provides `as_label`/`as_message` helpers for
//! logs and event reasons.

use thiserror::Error;

/// # Internal invariant violations.
///
/// These signal a defect in the adapter itself, never a recoverable runtime
/// condition. They are turned into a panic at the point of detection.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The slot queue was empty while the sequence was still active.
    #[error("slot queue is empty during `{op}` while the sequence is active")]
    EmptyQueue {
        /// Operation that expected a slot.
        op: &'static str,
    },

    /// The driver pulled again while a delivered item was still awaiting resumption.
    #[error("pulled past a delivered item that was never resumed")]
    Unresumed,

    /// The head slot's data was read twice.
    #[error("head slot data was already consumed")]
    HeadConsumed,
}

impl SequenceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use slotstream::SequenceError;
    ///
    /// let err = SequenceError::EmptyQueue { op: "emit" };
    /// assert_eq!(err.as_label(), "sequence_empty_queue");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SequenceError::EmptyQueue { .. } => "sequence_empty_queue",
            SequenceError::Unresumed => "sequence_unresumed",
            SequenceError::HeadConsumed => "sequence_head_consumed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SequenceError::EmptyQueue { op } => format!("empty slot queue: op={op}"),
            SequenceError::Unresumed => "delivered item not resumed".to_string(),
            SequenceError::HeadConsumed => "head data consumed twice".to_string(),
        }
    }

    /// Aborts on an invariant violation.
    #[cold]
    #[track_caller]
    pub(crate) fn fatal(self) -> ! {
        panic!("slotstream invariant violated: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_label_and_message() {
        let err = SequenceError::EmptyQueue { op: "tail" };
        assert_eq!(err.as_label(), "sequence_empty_queue");
        assert_eq!(err.as_message(), "empty slot queue: op=tail");
        assert_eq!(
            err.to_string(),
            "slot queue is empty during `tail` while the sequence is active"
        );
    }

    #[test]
    #[should_panic(expected = "slotstream invariant violated")]
    fn test_fatal_panics_with_message() {
        SequenceError::EmptyQueue { op: "tail" }.fatal();
    }
}
