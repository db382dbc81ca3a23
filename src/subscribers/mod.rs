//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`listen`] worker and
//! the built-in [`LogWriter`] (feature `logging`) for events broadcast
//! through a [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   SlotStream ── publish(Event) ──► Bus ──► listen() worker ──► Subscribe::on_event(&Event)
//!                                                                    │
//!                                                          ┌─────────┼─────────┐
//!                                                          ▼         ▼         ▼
//!                                                      LogWriter  Metrics   Custom
//! ```

mod listener;
#[cfg(feature = "logging")]
mod log;
mod subscriber;

pub use listener::listen;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::Subscribe;
