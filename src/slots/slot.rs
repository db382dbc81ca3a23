use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;

use crate::{
    controller::Resumption,
    signal::{Produced, ResumeSignal},
};

/// Outcome carried downstream by a slot's data cell.
pub(crate) type DataOutcome<T, R, E> = Result<Produced<T, R>, E>;

/// Outcome carried upstream by a slot's result cell.
pub(crate) type ResultOutcome<N, E> = Result<ResumeSignal<N>, E>;

/// One exchange cell: a data cell (producer → consumer) and a result cell
/// (consumer → producer), each resolvable at most once.
///
/// Both ends of both cells live in the slot itself; the controller takes the
/// data sender and the result receiver, the driver polls the data receiver
/// and takes the result sender.
pub(crate) struct Slot<T, R, N, E> {
    data_tx: Option<oneshot::Sender<DataOutcome<T, R, E>>>,
    data_rx: oneshot::Receiver<DataOutcome<T, R, E>>,
    result_tx: Option<oneshot::Sender<ResultOutcome<N, E>>>,
    result_rx: Option<oneshot::Receiver<ResultOutcome<N, E>>>,
}

impl<T, R, N, E> Slot<T, R, N, E> {
    /// Creates a new open slot.
    pub fn open() -> Self {
        let (data_tx, data_rx) = oneshot::channel();
        let (result_tx, result_rx) = oneshot::channel();
        Self {
            data_tx: Some(data_tx),
            data_rx,
            result_tx: Some(result_tx),
            result_rx: Some(result_rx),
        }
    }

    /// Returns `true` while the data cell is unwritten.
    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.data_tx.is_some()
    }

    /// Writes the data cell and hands out the result cell.
    ///
    /// A second write is ignored and returns an already-cancelled resumption.
    pub fn write(&mut self, data: DataOutcome<T, R, E>) -> Resumption<N, E> {
        if let Some(tx) = self.data_tx.take() {
            let _ = tx.send(data);
        }
        Resumption::new(self.result_rx.take())
    }

    /// Polls the data cell in place.
    ///
    /// Returns `Ready(None)` once the outcome was already taken.
    pub fn poll_data(&mut self, cx: &mut Context<'_>) -> Poll<Option<DataOutcome<T, R, E>>> {
        match Pin::new(&mut self.data_rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(Some(outcome)),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    /// Resolves the result cell. Later calls are no-ops.
    pub fn resolve(&mut self, outcome: ResultOutcome<N, E>) {
        if let Some(tx) = self.result_tx.take() {
            let _ = tx.send(outcome);
        }
    }

    /// Returns `true` once the result cell was resolved.
    pub fn is_resolved(&self) -> bool {
        self.result_tx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{FutureExt, future::poll_fn};

    type TestSlot = Slot<u32, &'static str, u8, String>;

    #[tokio::test]
    async fn test_write_then_poll_data() {
        let mut slot = TestSlot::open();
        assert!(slot.is_open());

        let _resumption = slot.write(Ok(Produced::Value(7)));
        assert!(!slot.is_open());

        let data = poll_fn(|cx| slot.poll_data(cx)).await;
        assert_eq!(data, Some(Ok(Produced::Value(7))));

        // Outcome already taken.
        let again = poll_fn(|cx| slot.poll_data(cx)).await;
        assert_eq!(again, None);
    }

    #[tokio::test]
    async fn test_second_write_is_ignored() {
        let mut slot = TestSlot::open();
        let first = slot.write(Ok(Produced::Value(1)));
        let second = slot.write(Ok(Produced::Value(2)));

        assert_eq!(second.await, Ok(ResumeSignal::Cancelled));

        let data = poll_fn(|cx| slot.poll_data(cx)).await;
        assert_eq!(data, Some(Ok(Produced::Value(1))));

        slot.resolve(Ok(ResumeSignal::Resumed(9)));
        assert_eq!(first.await, Ok(ResumeSignal::Resumed(9)));
    }

    #[tokio::test]
    async fn test_second_resolve_is_ignored() {
        let mut slot = TestSlot::open();
        let resumption = slot.write(Ok(Produced::Done("end")));

        slot.resolve(Err("boom".to_string()));
        assert!(slot.is_resolved());
        slot.resolve(Ok(ResumeSignal::Resumed(1)));

        assert_eq!(resumption.await, Err("boom".to_string()));
    }

    #[test]
    fn test_unwritten_data_is_pending() {
        let mut slot = TestSlot::open();
        let data = poll_fn(|cx| slot.poll_data(cx)).now_or_never();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_dropped_slot_resolves_cancelled() {
        let mut slot = TestSlot::open();
        let resumption = slot.write(Ok(Produced::Value(3)));
        drop(slot);
        assert_eq!(resumption.await, Ok(ResumeSignal::Cancelled));
    }
}
