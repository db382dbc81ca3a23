//! # SlotStream: the consumer-facing driver.
//!
//! Owns the producer future and polls it inside the consumer's pulls, so
//! producer and consumer are multiplexed on one task through suspension points.
//!
//! ## Flow
//! ```text
//! resume(n) ──► [Yielded?] resolve head.result = Resumed(n), pop head
//!           ──► poll producer, poll head.data
//!                 ├─ Value(t) ──► Yielded, return Value(t)
//!                 ├─ Done(r)  ──► terminate ──► settle ──► return Done(r)
//!                 └─ Err(e)   ──► terminate ──► settle ──► return Err(e)
//!
//! close()    ──► terminate ──► settle ──► producer outcome
//! throw(e)   ──► [Yielded?] head.result = Err(e) ──► terminate ──► settle
//!
//! terminate: set flag, drain every slot with Cancelled
//! settle:    poll the producer future to completion
//! ```
//!
//! ## Rules
//! - The driver only reads the head slot; the controller only writes the tail.
//! - Every slot left at termination is resolved; no producer operation hangs
//!   once termination begins.
//! - The producer is always awaited before the final outcome is reported.
//! - A producer failure after completion or after a signalled error is discarded.

use std::{
    convert::identity,
    fmt,
    future::{Future, poll_fn},
    mem,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll, ready},
};

use tokio::sync::broadcast;

use crate::{
    controller::Controller,
    error::SequenceError,
    events::{Bus, Event, EventKind},
    signal::{Produced, ResumeSignal},
    slots::{DataOutcome, Shared},
};

use super::{
    builder::SlotStreamBuilder,
    phase::{Phase, Report, Settled},
};

/// Boxed producer future.
pub(crate) type BoxProducer<E> = Pin<Box<dyn Future<Output = Result<(), E>> + Send + 'static>>;

/// Pull-side adapter over a push-style producer.
///
/// Type parameters:
/// - `T`: items emitted by the producer;
/// - `R`: final value passed to [`Controller::complete`];
/// - `N`: resumption value handed back to the producer on each pull;
/// - `E`: error type flowing in both directions.
///
/// For `N = ()` the stream also implements [`futures::Stream`] with
/// `Item = Result<T, E>`.
///
/// ## Example
/// ```rust
/// use slotstream::{Controller, Produced, ResumeSignal, SlotStream};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// // A running total: the consumer sends numbers back, the producer reports the sum.
/// let mut seq = SlotStream::new(|ctl: Controller<u32, u32, u32, ()>| async move {
///     let mut total = 0;
///     loop {
///         match ctl.emit(total).await? {
///             ResumeSignal::Resumed(n) if n > 0 => total += n,
///             _ => break,
///         }
///     }
///     let _ = ctl.complete(total).await;
///     Ok(())
/// });
///
/// assert_eq!(seq.resume(0).await, Some(Ok(Produced::Value(0))));
/// assert_eq!(seq.resume(5).await, Some(Ok(Produced::Value(5))));
/// assert_eq!(seq.resume(2).await, Some(Ok(Produced::Value(7))));
/// assert_eq!(seq.resume(0).await, Some(Ok(Produced::Done(7))));
/// assert_eq!(seq.resume(0).await, None);
/// # }
/// ```
pub struct SlotStream<T, R = (), N = (), E = ()> {
    shared: Arc<Shared<T, R, N, E>>,
    producer: Option<BoxProducer<E>>,
    /// Outcome of a producer future that finished before the report was handed out.
    settled: Option<Result<(), E>>,
    started: bool,
    phase: Phase<R, E>,
    delivered: u64,
    returned: Option<R>,
    name: Arc<str>,
    bus: Option<Bus>,
}

// The producer future is boxed; nothing is structurally pinned.
impl<T, R, N, E> Unpin for SlotStream<T, R, N, E> {}

impl SlotStream<()> {
    /// Returns a builder for configuring name and event bus.
    ///
    /// The item, return, resumption and error types are picked by
    /// [`SlotStreamBuilder::build`] from the producer.
    pub fn builder() -> SlotStreamBuilder {
        SlotStreamBuilder::new()
    }
}

impl<T, R, N, E> SlotStream<T, R, N, E> {
    /// Adapts `producer` with the default [`Config`](crate::Config).
    ///
    /// `producer` is invoked once, right away, with the sequence's
    /// [`Controller`]; the future it returns is first polled on the first pull.
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(Controller<T, R, N, E>) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        SlotStreamBuilder::new().build(producer)
    }

    pub(super) fn from_parts<F, Fut>(name: Arc<str>, bus: Option<Bus>, producer: F) -> Self
    where
        F: FnOnce(Controller<T, R, N, E>) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        let shared = Arc::new(Shared::new());
        let producer: BoxProducer<E> = Box::pin(producer(Controller::new(Arc::clone(&shared))));
        Self {
            shared,
            producer: Some(producer),
            settled: None,
            started: false,
            phase: Phase::Pulling,
            delivered: 0,
            returned: None,
            name,
            bus,
        }
    }

    /// Pulls the next item, answering the previously delivered one with `input`.
    ///
    /// - `Some(Ok(Produced::Value(t)))`: the next item;
    /// - `Some(Ok(Produced::Done(r)))`: the producer completed with `r`;
    /// - `Some(Err(e))`: the producer failed with `e`;
    /// - `None`: the sequence has already finished.
    ///
    /// The `input` of the first pull is discarded: no item has been delivered yet.
    /// Dropping the returned future keeps all progress; the next call continues.
    pub async fn resume(&mut self, input: N) -> Option<Result<Produced<T, R>, E>> {
        self.advance(input);
        poll_fn(|cx| self.poll_step(cx)).await
    }

    /// Stops the sequence early.
    ///
    /// A producer waiting on an emission observes `Cancelled`. Resolves once
    /// the producer future has finished, with its outcome. A producer that was
    /// never polled is dropped without running.
    pub async fn close(&mut self) -> Result<(), E> {
        self.begin_close();
        let settled = poll_fn(|cx| self.poll_settle(cx)).await;
        match settled {
            Some(Settled {
                report: Report::Cancelled,
                producer,
            }) => producer,
            Some(Settled { report, producer }) => {
                self.keep_return(report);
                self.discard(producer);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Injects `error` at the current yield point and stops the sequence.
    ///
    /// If an item is with the consumer, the producer's pending emission
    /// returns `Err(error)` and the producer future's outcome is returned:
    /// a producer that handles the error and returns `Ok(())` makes this
    /// return `Ok(())`. Otherwise nothing can receive the error and it is
    /// returned back.
    pub async fn throw(&mut self, error: E) -> Result<(), E> {
        let unrouted = self.begin_throw(error);
        let settled = poll_fn(|cx| self.poll_settle(cx)).await;
        match (unrouted, settled) {
            (None, Some(Settled { producer, .. })) => producer,
            (None, None) => Ok(()),
            (Some(error), settled) => {
                if let Some(Settled { report, producer }) = settled {
                    self.keep_return(report);
                    self.discard(producer);
                }
                Err(error)
            }
        }
    }

    /// Takes the final value once the producer completed.
    ///
    /// Filled by the [`Stream`](futures::Stream) adapter and by
    /// [`close`](Self::close)/[`throw`](Self::throw) when they settle a completed sequence.
    pub fn take_return(&mut self) -> Option<R> {
        self.returned.take()
    }

    /// Returns `true` once the sequence has reached its final state.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Number of items delivered to the consumer so far.
    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Sequence name used in events.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Event bus this sequence publishes to, if any.
    pub fn bus(&self) -> Option<&Bus> {
        self.bus.as_ref()
    }

    /// Subscribes to this sequence's events.
    ///
    /// Returns `None` when the sequence publishes no events.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<Event>> {
        self.bus.as_ref().map(Bus::subscribe)
    }

    /// Answers the delivered item, if any, and moves back to pulling.
    pub(super) fn advance(&mut self, input: N) {
        if !matches!(self.phase, Phase::Yielded) {
            return;
        }
        if let Some(mut slot) = self.shared.lock().pop_head() {
            slot.resolve(Ok(ResumeSignal::Resumed(input)));
        }
        self.phase = Phase::Pulling;
        self.publish(EventKind::ConsumerResumed, |ev| ev.with_item(self.delivered));
    }

    /// Drives the state machine until an item, a final outcome, or `None`.
    pub(super) fn poll_step(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Produced<T, R>, E>>> {
        loop {
            match self.phase {
                Phase::Finished => return Poll::Ready(None),
                Phase::Yielded => SequenceError::Unresumed.fatal(),
                Phase::Pulling => match ready!(self.poll_head(cx)) {
                    Ok(Produced::Value(item)) => {
                        self.phase = Phase::Yielded;
                        self.delivered += 1;
                        self.publish(EventKind::ItemDelivered, |ev| ev.with_item(self.delivered));
                        return Poll::Ready(Some(Ok(Produced::Value(item))));
                    }
                    Ok(Produced::Done(value)) => {
                        self.publish(EventKind::ProducerCompleted, identity);
                        self.terminate(Report::Done(value));
                    }
                    Err(error) => {
                        self.publish(EventKind::ProducerFailed, identity);
                        self.terminate(Report::Failed(error));
                    }
                },
                Phase::Settling(_) => {
                    let Some(Settled { report, producer }) = ready!(self.poll_settle(cx)) else {
                        continue;
                    };
                    self.discard(producer);
                    return Poll::Ready(match report {
                        Report::Done(value) => Some(Ok(Produced::Done(value))),
                        Report::Failed(error) => Some(Err(error)),
                        Report::Cancelled => None,
                    });
                }
            }
        }
    }

    /// Polls the producer for progress, then the head slot's data.
    fn poll_head(&mut self, cx: &mut Context<'_>) -> Poll<DataOutcome<T, R, E>> {
        if !self.started {
            self.started = true;
            self.publish(EventKind::SequenceStarted, identity);
        }
        self.poll_producer(cx);

        let polled = self
            .shared
            .lock()
            .head_mut()
            .unwrap_or_else(|e| e.fatal())
            .poll_data(cx);
        match polled {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(data)) => Poll::Ready(data),
            Poll::Ready(None) => SequenceError::HeadConsumed.fatal(),
        }
    }

    /// Polls the producer future while the sequence is live.
    ///
    /// A producer that fails before ending the sequence has its error written
    /// into the tail slot, so the consumer raises it after any queued items.
    fn poll_producer(&mut self, cx: &mut Context<'_>) {
        let Some(producer) = self.producer.as_mut() else {
            return;
        };
        let Poll::Ready(outcome) = producer.as_mut().poll(cx) else {
            return;
        };
        self.producer = None;
        self.publish_settled(&outcome);

        let Err(error) = outcome else {
            self.settled = Some(Ok(()));
            return;
        };
        let mut queue = self.shared.lock();
        if self.shared.is_ended() {
            drop(queue);
            self.settled = Some(Err(error));
            return;
        }
        self.shared.end(&mut queue);
        let _ = queue
            .tail_mut()
            .unwrap_or_else(|e| e.fatal())
            .write(Err(error));
    }

    /// Waits for the producer future once terminated, then hands out the report.
    ///
    /// Returns `Ready(None)` when not settling.
    fn poll_settle(&mut self, cx: &mut Context<'_>) -> Poll<Option<Settled<R, E>>> {
        if !matches!(self.phase, Phase::Settling(_)) {
            return Poll::Ready(None);
        }
        if let Some(producer) = self.producer.as_mut() {
            let outcome = ready!(producer.as_mut().poll(cx));
            self.producer = None;
            self.publish_settled(&outcome);
            self.settled = Some(outcome);
        }

        let Phase::Settling(report) = mem::replace(&mut self.phase, Phase::Finished) else {
            return Poll::Ready(None);
        };
        self.publish(EventKind::SequenceClosed, |ev| ev.with_item(self.delivered));
        Poll::Ready(Some(Settled {
            report,
            producer: self.settled.take().unwrap_or(Ok(())),
        }))
    }

    /// Sets the termination flag, drains every slot and starts settling.
    fn terminate(&mut self, report: Report<R, E>) {
        let drained = {
            let mut queue = self.shared.lock();
            self.shared.end(&mut queue);
            queue.drain_all()
        };
        self.publish(EventKind::SlotsDrained, |ev| ev.with_drained(drained));
        self.phase = Phase::Settling(report);
    }

    fn begin_close(&mut self) {
        if !matches!(self.phase, Phase::Pulling | Phase::Yielded) {
            return;
        }
        if !self.started {
            self.producer = None;
        }
        self.publish(EventKind::ConsumerCancelled, |ev| ev.with_item(self.delivered));
        self.terminate(Report::Cancelled);
    }

    /// Routes `error` into the delivered slot, if any; returns it otherwise.
    fn begin_throw(&mut self, error: E) -> Option<E> {
        match self.phase {
            Phase::Yielded => {
                {
                    let mut queue = self.shared.lock();
                    self.shared.end(&mut queue);
                    if let Some(mut slot) = queue.pop_head() {
                        slot.resolve(Err(error));
                    }
                }
                self.publish(EventKind::ConsumerThrew, |ev| ev.with_reason("routed"));
                self.terminate(Report::Cancelled);
                None
            }
            Phase::Pulling => {
                if !self.started {
                    self.producer = None;
                }
                self.publish(EventKind::ConsumerThrew, |ev| ev.with_reason("returned"));
                self.terminate(Report::Cancelled);
                Some(error)
            }
            Phase::Settling(_) | Phase::Finished => Some(error),
        }
    }

    pub(super) fn set_return(&mut self, value: R) {
        self.returned = Some(value);
    }

    fn keep_return(&mut self, report: Report<R, E>) {
        if let Report::Done(value) = report {
            self.returned = Some(value);
        }
    }

    /// Drops a producer failure that can no longer be surfaced.
    fn discard(&self, producer: Result<(), E>) {
        if producer.is_err() {
            self.publish(EventKind::ProducerFailureDiscarded, identity);
        }
    }

    fn publish_settled(&self, outcome: &Result<(), E>) {
        let reason = if outcome.is_ok() { "ok" } else { "failed" };
        self.publish(EventKind::ProducerSettled, |ev| ev.with_reason(reason));
    }

    fn publish(&self, kind: EventKind, decorate: impl FnOnce(Event) -> Event) {
        if let Some(bus) = &self.bus {
            bus.publish(decorate(Event::new(kind).with_sequence(Arc::clone(&self.name))));
        }
    }
}

impl<T, R, N, E> Drop for SlotStream<T, R, N, E> {
    fn drop(&mut self) {
        if matches!(self.phase, Phase::Finished) {
            return;
        }
        let mut queue = self.shared.lock();
        self.shared.end(&mut queue);
        queue.drain_all();
    }
}

impl<T, R, N, E> fmt::Debug for SlotStream<T, R, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotStream")
            .field("name", &self.name)
            .field("phase", &self.phase.as_label())
            .field("delivered", &self.delivered)
            .finish()
    }
}
