//! # Values exchanged through a slot.
//!
//! - [`Produced`] travels downstream (producer → consumer) through a slot's data cell.
//! - [`ResumeSignal`] travels upstream (consumer → producer) through a slot's result cell.
//!
//! Rejections are not variants here: both cells carry a `Result<_, E>` and the
//! `Err` arm is the rejection.

/// Item written by the producer into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Produced<T, R> {
    /// A plain item; more may follow.
    Value(T),
    /// Sequence termination with its final return value.
    Done(R),
}

impl<T, R> Produced<T, R> {
    /// Returns `true` for [`Produced::Done`].
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Produced::Done(_))
    }

    /// Returns the item of a [`Produced::Value`].
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Produced::Value(v) => Some(v),
            Produced::Done(_) => None,
        }
    }

    /// Returns the final value of a [`Produced::Done`].
    #[inline]
    pub fn into_done(self) -> Option<R> {
        match self {
            Produced::Value(_) => None,
            Produced::Done(r) => Some(r),
        }
    }
}

/// Signal handed back to the producer once its item was taken.
///
/// `Cancelled` covers every way the sequence can be over from the producer's
/// point of view: the consumer stopped early, the slot was drained during
/// shutdown, or the operation was issued after termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSignal<N> {
    /// The consumer took the item and resumed with a value.
    Resumed(N),
    /// The sequence has ended; stop producing.
    Cancelled,
}

impl<N> ResumeSignal<N> {
    /// Returns `true` for [`ResumeSignal::Cancelled`].
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResumeSignal::Cancelled)
    }

    /// Returns `true` for [`ResumeSignal::Resumed`].
    #[inline]
    pub fn is_resumed(&self) -> bool {
        matches!(self, ResumeSignal::Resumed(_))
    }

    /// Returns the resumption value, if any.
    #[inline]
    pub fn into_value(self) -> Option<N> {
        match self {
            ResumeSignal::Resumed(n) => Some(n),
            ResumeSignal::Cancelled => None,
        }
    }

    /// Maps the resumption value, keeping cancellation as is.
    #[inline]
    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> ResumeSignal<M> {
        match self {
            ResumeSignal::Resumed(n) => ResumeSignal::Resumed(f(n)),
            ResumeSignal::Cancelled => ResumeSignal::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produced_accessors() {
        let v: Produced<u8, &str> = Produced::Value(1);
        assert!(!v.is_done());
        assert_eq!(v.into_value(), Some(1));

        let d: Produced<u8, &str> = Produced::Done("end");
        assert!(d.is_done());
        assert_eq!(d.into_value(), None);
        assert_eq!(d.into_done(), Some("end"));
    }

    #[test]
    fn test_resume_signal_map_keeps_cancellation() {
        assert_eq!(ResumeSignal::Resumed(2).map(|n| n * 10), ResumeSignal::Resumed(20));
        assert_eq!(
            ResumeSignal::<u8>::Cancelled.map(|n| n * 10),
            ResumeSignal::Cancelled
        );
        assert!(ResumeSignal::<()>::Cancelled.is_cancelled());
        assert!(ResumeSignal::Resumed(()).is_resumed());
    }
}
