//! # Lifecycle events emitted by a sequence.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Flow events**: the sequence started, an item was delivered, the consumer resumed
//! - **Termination events**: who ended the sequence (producer completion/failure, consumer stop/throw)
//! - **Shutdown events**: slots drained, producer settled, sequence closed
//! - **Subscriber events**: a listener worker panicked or fell behind
//!
//! The [`Event`] struct carries metadata such as timestamps, sequence name,
//! item index and drained slot count.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use slotstream::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ItemDelivered)
//!     .with_sequence("numbers")
//!     .with_item(3);
//!
//! assert_eq!(ev.kind, EventKind::ItemDelivered);
//! assert_eq!(ev.sequence.as_deref(), Some("numbers"));
//! assert_eq!(ev.item, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of sequence events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Flow events ===
    /// The producer future was polled for the first time.
    ///
    /// Sets:
    /// - `sequence`: sequence name
    SequenceStarted,

    /// An item was handed to the consumer.
    ///
    /// Sets:
    /// - `sequence`: sequence name
    /// - `item`: item index (1-based)
    ItemDelivered,

    /// The consumer resumed after an item; its slot was released.
    ///
    /// Sets:
    /// - `sequence`: sequence name
    /// - `item`: index of the resumed item
    ConsumerResumed,

    // === Termination events ===
    /// The producer completed the sequence with a final value.
    ProducerCompleted,

    /// The consumer reached a producer error, signalled through `fail` or
    /// returned by the producer future before the sequence ended.
    ProducerFailed,

    /// The consumer stopped the sequence early.
    ///
    /// Sets:
    /// - `item`: number of items delivered so far
    ConsumerCancelled,

    /// The consumer injected an error.
    ///
    /// Sets:
    /// - `reason`: `"routed"` when it reached a pending emission, `"returned"` otherwise
    ConsumerThrew,

    // === Shutdown events ===
    /// Remaining slots were resolved as cancelled.
    ///
    /// Sets:
    /// - `drained`: number of released slots
    SlotsDrained,

    /// The producer future finished.
    ///
    /// Sets:
    /// - `reason`: `"ok"` or `"failed"`
    ProducerSettled,

    /// The producer failed after the sequence had already ended; the failure was dropped.
    ProducerFailureDiscarded,

    /// The sequence reached its final state.
    ///
    /// Sets:
    /// - `item`: total number of delivered items
    SequenceClosed,

    // === Subscriber events ===
    /// A subscriber panicked while handling an event.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,

    /// A subscriber fell behind the bus and skipped events.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `item`: number of skipped events
    SubscriberOverflow,
}

/// Sequence event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the sequence that emitted the event.
    pub sequence: Option<Arc<str>>,
    /// Item index or count (starting from 1).
    pub item: Option<u64>,
    /// Number of slots drained at shutdown.
    pub drained: Option<usize>,
    /// Short machine-friendly detail.
    pub reason: Option<Arc<str>>,
    /// Subscriber the event is about.
    pub subscriber: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            sequence: None,
            item: None,
            drained: None,
            reason: None,
            subscriber: None,
        }
    }

    /// Attaches the sequence name.
    #[inline]
    pub fn with_sequence(mut self, name: impl Into<Arc<str>>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    /// Attaches an item index or count.
    #[inline]
    pub fn with_item(mut self, n: u64) -> Self {
        self.item = Some(n);
        self
    }

    /// Attaches a drained slot count.
    #[inline]
    pub fn with_drained(mut self, n: usize) -> Self {
        self.drained = Some(n);
        self
    }

    /// Attaches a reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a subscriber name.
    #[inline]
    pub fn with_subscriber(mut self, name: &'static str) -> Self {
        self.subscriber = Some(name);
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_subscriber(subscriber)
            .with_reason(info)
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, skipped: u64) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_subscriber(subscriber)
            .with_item(skipped)
    }

    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
        )
    }

    /// Returns `true` for events that mark why the sequence ended.
    #[inline]
    pub fn is_termination(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ProducerCompleted
                | EventKind::ProducerFailed
                | EventKind::ConsumerCancelled
                | EventKind::ConsumerThrew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::SequenceStarted);
        let b = Event::new(EventKind::SequenceClosed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::new(EventKind::SlotsDrained)
            .with_sequence("s")
            .with_drained(2)
            .with_reason("close");
        assert_eq!(ev.sequence.as_deref(), Some("s"));
        assert_eq!(ev.drained, Some(2));
        assert_eq!(ev.reason.as_deref(), Some("close"));
        assert!(!ev.is_termination());
        assert!(Event::new(EventKind::ConsumerThrew).is_termination());
    }

    #[test]
    fn test_subscriber_events_carry_name() {
        let panicked = Event::subscriber_panicked("metrics", "boom".to_string());
        assert_eq!(panicked.subscriber, Some("metrics"));
        assert_eq!(panicked.reason.as_deref(), Some("boom"));
        assert!(panicked.is_subscriber_event());

        let overflow = Event::subscriber_overflow("metrics", 3);
        assert_eq!(overflow.item, Some(3));
        assert!(overflow.is_subscriber_event());
        assert!(!overflow.is_termination());
    }
}
