//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [started] seq="numbers"
//! [delivered] seq="numbers" item=1
//! [resumed] seq="numbers" item=1
//! [completed] seq="numbers"
//! [drained] seq="numbers" slots=1
//! [settled] seq="numbers" outcome=ok
//! [closed] seq="numbers" items=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let seq = e.sequence.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::SequenceStarted => println!("[started] seq={seq:?}"),
            EventKind::ItemDelivered => {
                println!("[delivered] seq={seq:?} item={:?}", e.item);
            }
            EventKind::ConsumerResumed => {
                println!("[resumed] seq={seq:?} item={:?}", e.item);
            }
            EventKind::ProducerCompleted => println!("[completed] seq={seq:?}"),
            EventKind::ProducerFailed => println!("[failed] seq={seq:?}"),
            EventKind::ConsumerCancelled => {
                println!("[cancelled] seq={seq:?} after_items={:?}", e.item);
            }
            EventKind::ConsumerThrew => {
                println!("[threw] seq={seq:?} reason={:?}", e.reason);
            }
            EventKind::SlotsDrained => {
                println!("[drained] seq={seq:?} slots={:?}", e.drained);
            }
            EventKind::ProducerSettled => {
                println!("[settled] seq={seq:?} outcome={:?}", e.reason);
            }
            EventKind::ProducerFailureDiscarded => {
                println!("[failure-discarded] seq={seq:?}");
            }
            EventKind::SequenceClosed => {
                println!("[closed] seq={seq:?} items={:?}", e.item);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={:?} info={:?}",
                    e.subscriber, e.reason
                );
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={:?} skipped={:?}",
                    e.subscriber, e.item
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
