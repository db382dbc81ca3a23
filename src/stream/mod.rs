//! Consumer-facing driver.
//!
//! The only public API from this module is [`SlotStream`] and its builder.
//!
//! Internal modules:
//! - [`phase`]: driver states and termination reports;
//! - [`driver`]: the pull state machine (resume / close / throw);
//! - [`adapter`]: `futures::Stream` impl for sequences without resumption values;
//! - [`builder`]: name, config and event bus wiring.

mod adapter;
mod builder;
mod driver;
mod phase;


pub use builder::SlotStreamBuilder;
pub use driver::SlotStream;
