//! # Producer-facing side.
//!
//! - [`Controller`]: emit / emit_all / emit_stream / fail / complete;
//! - [`Resumption`]: the future every operation returns.
//!
//! ## Rules
//! - The termination flag is checked under the queue lock before any write.
//! - After termination every operation resolves `Cancelled` immediately.
//! - Backpressure holds as long as each resumption is awaited before the next emit.

mod handle;
mod resumption;

pub use handle::Controller;
pub use resumption::Resumption;
