//! # slotstream
//!
//! **slotstream** adapts a push-style producer (it decides when to emit, by
//! calling a [`Controller`]) into a pull-style sequence (the consumer asks for
//! each item and may stop early), with strict backpressure and symmetric
//! cancellation and error propagation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   producer(ctl) ── future, polled inside every pull ──┐
//!        │                                              │
//!        │ emit / emit_all / fail / complete            │
//!        ▼                                              ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Shared                                                          │
//! │  - SlotQueue: [ slot(delivered) | slot(open) ]  (FIFO)           │
//! │  - termination flag (CancellationToken)                          │
//! └──────────────────────────────────────────────────────────────────┘
//!        ▲ tail writes                          head reads ▲
//!        │                                                 │
//!   Controller ◄── Resumption (Resumed(n) / Cancelled / Err) ── SlotStream
//!                                                               │
//!                                   resume(n) / close() / throw(e) / Stream
//!                                                               ▼
//!                                                           consumer
//! ```
//!
//! ### Lifecycle
//! ```text
//! SlotStream::new(producer)
//!
//! loop {
//!   ├─► resume(n): answer the delivered slot with Resumed(n), pop it
//!   ├─► poll producer, poll head.data
//!   │       ├─ Value(t) ─► hand t to the consumer
//!   │       ├─ Done(r)  ─► terminate, settle, return Done(r)
//!   │       └─ Err(e)   ─► terminate, settle, return Err(e)
//!   └─ exit conditions:
//!        - producer completed or failed
//!        - consumer close() / throw(e) / drop
//! }
//!
//! terminate: set flag ─► drain every slot with Cancelled
//! settle:    await the producer future before reporting the outcome
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------------|-------------------------------------------|
//! | **Producer**      | Emit items, delegate to iterators/streams, fail, complete.      | [`Controller`], [`Resumption`]            |
//! | **Consumer**      | Pull with resumption values, close early, inject errors.        | [`SlotStream`], [`Produced`]              |
//! | **Signals**       | Values exchanged through a slot.                                | [`Produced`], [`ResumeSignal`]            |
//! | **Events**        | Lifecycle events on a broadcast bus, pluggable subscribers.     | [`Event`], [`Bus`], [`Subscribe`]         |
//! | **Configuration** | Sequence name and event bus wiring.                             | [`Config`], [`SlotStreamBuilder`]         |
//! | **Errors**        | Internal invariant violations.                                  | [`SequenceError`]                         |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use futures::StreamExt;
//! use slotstream::{Controller, SlotStream};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut words = SlotStream::builder()
//!         .with_name("words")
//!         .build(|ctl: Controller<&'static str, usize, (), String>| async move {
//!             let mut count = 0;
//!             for word in ["push", "meets", "pull"] {
//!                 if ctl.emit(word).await?.is_cancelled() {
//!                     return Ok(());
//!                 }
//!                 count += 1;
//!             }
//!             let _ = ctl.complete(count).await;
//!             Ok(())
//!         });
//!
//!     while let Some(word) = words.next().await {
//!         println!("{}", word?);
//!     }
//!     assert_eq!(words.take_return(), Some(3));
//!     Ok(())
//! }
//! ```
mod config;
mod controller;
mod error;
mod events;
mod signal;
mod slots;
mod stream;

pub mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use controller::{Controller, Resumption};
pub use error::SequenceError;
pub use events::{Bus, Event, EventKind};
pub use signal::{Produced, ResumeSignal};
pub use stream::{SlotStream, SlotStreamBuilder};
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

use std::future::Future;

/// Adapts `producer` into a [`SlotStream`] with the default configuration.
///
/// Shorthand for [`SlotStream::new`].
pub fn adapt<T, R, N, E, F, Fut>(producer: F) -> SlotStream<T, R, N, E>
where
    F: FnOnce(Controller<T, R, N, E>) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    SlotStream::new(producer)
}
