//! Sequence events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: the [`SlotStream`](crate::SlotStream) driver, at each state transition.
//! - **Consumers**: [`subscribers::listen`](crate::subscribers::listen) workers and
//!   any receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
