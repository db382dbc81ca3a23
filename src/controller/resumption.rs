use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;

use crate::signal::ResumeSignal;

/// Future returned by every producer operation.
///
/// Resolves once the consumer has taken delivery of the emitted item and
/// resumed (`Resumed(n)`), stopped (`Cancelled`) or injected an error (`Err`).
///
/// ### Rules
/// - Operations on an ended sequence return an already-resolved `Cancelled`.
/// - A slot dropped without being resolved is observed as `Cancelled`, so a
///   resumption never hangs once the sequence is torn down.
#[must_use = "await the resumption to respect backpressure"]
#[derive(Debug)]
pub struct Resumption<N, E> {
    rx: Option<oneshot::Receiver<Result<ResumeSignal<N>, E>>>,
}

impl<N, E> Resumption<N, E> {
    pub(crate) fn new(rx: Option<oneshot::Receiver<Result<ResumeSignal<N>, E>>>) -> Self {
        Self { rx }
    }

    /// A resumption for an operation issued after termination.
    pub(crate) fn ended() -> Self {
        Self { rx: None }
    }
}

impl<N, E> Future for Resumption<N, E> {
    type Output = Result<ResumeSignal<N>, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(Ok(ResumeSignal::Cancelled));
        };
        let out = match Pin::new(rx).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(Ok(outcome)) => outcome,
            Poll::Ready(Err(oneshot::Canceled)) => Ok(ResumeSignal::Cancelled),
        };
        self.rx = None;
        Poll::Ready(out)
    }
}
