use std::{fmt, pin::pin, sync::Arc};

use futures::{Stream, StreamExt, TryStream, TryStreamExt};
use tokio_util::sync::CancellationToken;

use crate::{
    signal::{Produced, ResumeSignal},
    slots::{DataOutcome, Shared},
};

use super::resumption::Resumption;

/// Producer-facing handle of a [`SlotStream`](crate::SlotStream).
///
/// Every operation writes into the queue's open tail slot and returns a
/// [`Resumption`] the producer must await before proceeding. Once the
/// sequence has ended (completion, error, or consumer stop) every operation
/// returns an already-resolved `Cancelled` and leaves the queue untouched.
///
/// ## Example
/// ```rust
/// use futures::StreamExt;
/// use slotstream::{Controller, ResumeSignal};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut seq = slotstream::adapt(|ctl: Controller<u32, (), (), ()>| async move {
///     for i in 0..3 {
///         if ctl.emit(i).await?.is_cancelled() {
///             return Ok(());
///         }
///     }
///     let _ = ctl.complete(()).await;
///     Ok(())
/// });
///
/// let items: Vec<u32> = (&mut seq).map(|r| r.unwrap()).collect().await;
/// assert_eq!(items, vec![0, 1, 2]);
/// # }
/// ```
pub struct Controller<T, R = (), N = (), E = ()> {
    shared: Arc<Shared<T, R, N, E>>,
}

impl<T, R, N, E> Clone for Controller<T, R, N, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, R, N, E> fmt::Debug for Controller<T, R, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("ended", &self.shared.is_ended())
            .finish()
    }
}

impl<T, R, N, E> Controller<T, R, N, E> {
    pub(crate) fn new(shared: Arc<Shared<T, R, N, E>>) -> Self {
        Self { shared }
    }

    /// Emits one item.
    ///
    /// Resolves to `Resumed(n)` once the consumer took the item and pulled
    /// again with `n`, to `Cancelled` if the consumer stopped, or to `Err` if
    /// the consumer injected an error at this item.
    pub fn emit(&self, item: T) -> Resumption<N, E> {
        let mut queue = self.shared.lock();
        if self.shared.is_ended() {
            return Resumption::ended();
        }
        let resumption = queue
            .tail_mut()
            .unwrap_or_else(|e| e.fatal())
            .write(Ok(Produced::Value(item)));
        queue.append_open();
        resumption
    }

    /// Forwards every item of `items` through [`emit`](Self::emit).
    ///
    /// Stops at the first `Cancelled` and returns it. After exhausting the
    /// source returns `Resumed` with the resumption value of the last item
    /// (`None` for an empty source).
    pub async fn emit_all<I>(&self, items: I) -> Result<ResumeSignal<Option<N>>, E>
    where
        I: IntoIterator<Item = T>,
    {
        let mut last = None;
        for item in items {
            if self.is_ended() {
                return Ok(ResumeSignal::Cancelled);
            }
            match self.emit(item).await? {
                ResumeSignal::Resumed(n) => last = Some(n),
                ResumeSignal::Cancelled => return Ok(ResumeSignal::Cancelled),
            }
        }
        Ok(ResumeSignal::Resumed(last))
    }

    /// Forwards every item of an asynchronous source through [`emit`](Self::emit).
    ///
    /// Same stop/return rules as [`emit_all`](Self::emit_all). The source is
    /// not polled again once the sequence has ended.
    pub async fn emit_stream<S>(&self, items: S) -> Result<ResumeSignal<Option<N>>, E>
    where
        S: Stream<Item = T>,
    {
        let mut items = pin!(items);
        let mut last = None;
        loop {
            if self.is_ended() {
                return Ok(ResumeSignal::Cancelled);
            }
            let Some(item) = items.next().await else {
                return Ok(ResumeSignal::Resumed(last));
            };
            match self.emit(item).await? {
                ResumeSignal::Resumed(n) => last = Some(n),
                ResumeSignal::Cancelled => return Ok(ResumeSignal::Cancelled),
            }
        }
    }

    /// Like [`emit_stream`](Self::emit_stream) for a fallible source.
    ///
    /// A source error is returned to the caller as is; it is not signalled
    /// downstream. Pass it to [`fail`](Self::fail) to end the sequence with it.
    pub async fn emit_try_stream<S>(&self, items: S) -> Result<ResumeSignal<Option<N>>, E>
    where
        S: TryStream<Ok = T, Error = E>,
    {
        let mut items = pin!(items.into_stream());
        let mut last = None;
        loop {
            if self.is_ended() {
                return Ok(ResumeSignal::Cancelled);
            }
            let Some(item) = items.try_next().await? else {
                return Ok(ResumeSignal::Resumed(last));
            };
            match self.emit(item).await? {
                ResumeSignal::Resumed(n) => last = Some(n),
                ResumeSignal::Cancelled => return Ok(ResumeSignal::Cancelled),
            }
        }
    }

    /// Ends the sequence with `error`; the consumer's next pull raises it.
    ///
    /// The returned resumption resolves to `Cancelled` once the consumer has
    /// observed the error.
    pub fn fail(&self, error: E) -> Resumption<N, E> {
        self.terminate(Err(error))
    }

    /// Ends the sequence with the final value `value`.
    ///
    /// The returned resumption resolves to `Cancelled` once the consumer has
    /// observed the completion.
    pub fn complete(&self, value: R) -> Resumption<N, E> {
        self.terminate(Ok(Produced::Done(value)))
    }

    /// Returns `true` once the sequence has ended.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.shared.is_ended()
    }

    /// Completes when the sequence ends.
    ///
    /// Useful to abort long work between emissions:
    /// `tokio::select! { _ = ctl.ended() => ..., res = work() => ... }`.
    pub async fn ended(&self) {
        self.shared.token().cancelled().await
    }

    /// Returns a child token cancelled when the sequence ends.
    ///
    /// Cancelling the returned token does not end the sequence.
    pub fn token(&self) -> CancellationToken {
        self.shared.token().child_token()
    }

    fn terminate(&self, data: DataOutcome<T, R, E>) -> Resumption<N, E> {
        let mut queue = self.shared.lock();
        if self.shared.is_ended() {
            return Resumption::ended();
        }
        self.shared.end(&mut queue);
        queue
            .tail_mut()
            .unwrap_or_else(|e| e.fatal())
            .write(data)
    }
}
