/// Driver state.
///
/// ```text
/// Pulling ──Value──► Yielded ──resume──► Pulling
///    │                  │
///    ├─Done / Err───────┼─close / throw──► Settling(report) ──producer settled──► Finished
///    └─close / throw────┘
/// ```
pub(super) enum Phase<R, E> {
    /// Waiting on the head slot's data.
    Pulling,
    /// The head slot's item is with the consumer, awaiting resumption.
    Yielded,
    /// Terminated and drained; waiting for the producer future to finish.
    Settling(Report<R, E>),
    /// Final state; every pull returns `None`.
    Finished,
}

impl<R, E> Phase<R, E> {
    pub fn as_label(&self) -> &'static str {
        match self {
            Phase::Pulling => "pulling",
            Phase::Yielded => "yielded",
            Phase::Settling(_) => "settling",
            Phase::Finished => "finished",
        }
    }
}

/// Why the sequence terminated; reported once the producer has settled.
pub(super) enum Report<R, E> {
    /// The producer completed with a final value.
    Done(R),
    /// The producer failed (signalled or returned).
    Failed(E),
    /// The consumer closed the sequence or threw into it.
    Cancelled,
}

/// Termination report paired with the producer future's own outcome.
pub(super) struct Settled<R, E> {
    pub report: Report<R, E>,
    pub producer: Result<(), E>,
}
