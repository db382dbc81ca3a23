use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use super::queue::SlotQueue;

/// State shared by a controller and its driver: the slot queue and the
/// termination flag.
///
/// The flag is only set while the queue lock is held, so "check flag, then
/// write tail" in the controller and "set flag, then drain" in the driver
/// never interleave.
pub(crate) struct Shared<T, R, N, E> {
    queue: Mutex<SlotQueue<T, R, N, E>>,
    ended: CancellationToken,
}

impl<T, R, N, E> Shared<T, R, N, E> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(SlotQueue::new()),
            ended: CancellationToken::new(),
        }
    }

    /// Locks the queue.
    ///
    /// Poisoning is ignored: every critical section leaves the queue consistent.
    pub fn lock(&self) -> MutexGuard<'_, SlotQueue<T, R, N, E>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended.is_cancelled()
    }

    /// Sets the termination flag. Call with the queue lock held.
    #[inline]
    pub fn end(&self, _queue: &mut SlotQueue<T, R, N, E>) {
        self.ended.cancel();
    }

    /// Token cancelled when the sequence terminates.
    #[inline]
    pub fn token(&self) -> &CancellationToken {
        &self.ended
    }
}
