use std::collections::VecDeque;

use crate::{error::SequenceError, signal::ResumeSignal};

use super::slot::Slot;

/// Ordered backlog of slots (FIFO, insertion order = production order).
///
/// ## Invariants
/// - While the sequence is active the queue holds at least one slot and the
///   last one is open.
/// - The controller only touches the tail, the driver only touches the head.
pub(crate) struct SlotQueue<T, R, N, E> {
    slots: VecDeque<Slot<T, R, N, E>>,
}

impl<T, R, N, E> SlotQueue<T, R, N, E> {
    /// Creates a queue holding a single open slot.
    pub fn new() -> Self {
        let mut queue = Self {
            slots: VecDeque::with_capacity(2),
        };
        queue.append_open();
        queue
    }

    /// Appends a fresh open slot at the tail.
    pub fn append_open(&mut self) {
        self.slots.push_back(Slot::open());
    }

    /// Returns the open slot awaiting production.
    pub fn tail_mut(&mut self) -> Result<&mut Slot<T, R, N, E>, SequenceError> {
        self.slots
            .back_mut()
            .ok_or(SequenceError::EmptyQueue { op: "tail" })
    }

    /// Returns the slot the driver is currently serving.
    pub fn head_mut(&mut self) -> Result<&mut Slot<T, R, N, E>, SequenceError> {
        self.slots
            .front_mut()
            .ok_or(SequenceError::EmptyQueue { op: "head" })
    }

    /// Removes and returns the head slot.
    pub fn pop_head(&mut self) -> Option<Slot<T, R, N, E>> {
        self.slots.pop_front()
    }

    /// Resolves every remaining slot as cancelled and empties the queue.
    ///
    /// Returns the number of slots whose result was still unresolved.
    pub fn drain_all(&mut self) -> usize {
        let mut released = 0;
        for mut slot in self.slots.drain(..) {
            if !slot.is_resolved() {
                released += 1;
            }
            slot.resolve(Ok(ResumeSignal::Cancelled));
        }
        released
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Produced;

    type TestQueue = SlotQueue<u32, (), (), String>;

    #[test]
    fn test_new_queue_has_one_open_slot() {
        let mut queue = TestQueue::new();
        assert_eq!(queue.len(), 1);
        assert!(queue.tail_mut().map(|s| s.is_open()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let mut queue = TestQueue::new();
        for i in 0..3 {
            let _ = queue
                .tail_mut()
                .map(|s| s.write(Ok(Produced::Value(i))))
                .unwrap();
            queue.append_open();
        }
        assert_eq!(queue.len(), 4);

        for expected in 0..3 {
            let mut head = queue.pop_head().unwrap();
            let data = futures::future::poll_fn(|cx| head.poll_data(cx)).await;
            assert_eq!(data, Some(Ok(Produced::Value(expected))));
        }
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn test_drain_all_releases_waiters() {
        let mut queue = TestQueue::new();
        let pending = queue.tail_mut().unwrap().write(Ok(Produced::Value(1)));
        queue.append_open();

        assert_eq!(queue.drain_all(), 2);
        assert!(queue.is_empty());
        assert_eq!(pending.await, Ok(ResumeSignal::Cancelled));
    }

    #[test]
    fn test_empty_queue_reports_invariant_error() {
        let mut queue = TestQueue::new();
        queue.drain_all();
        assert_eq!(
            queue.tail_mut().err(),
            Some(SequenceError::EmptyQueue { op: "tail" })
        );
        assert_eq!(
            queue.head_mut().err(),
            Some(SequenceError::EmptyQueue { op: "head" })
        );
    }
}
