//! # Slot queue: the only synchronization surface.
//!
//! ```text
//!   Controller (producer)                          SlotStream (consumer)
//!        │ write tail                                   │ poll head
//!        ▼                                              ▼
//!   ┌─────────┬─────────┐                         ┌─────────┐
//!   │ slot #n │ slot #n+1 (open) ◄── tail   head ─►│ slot #n │
//!   └─────────┴─────────┘                         └─────────┘
//!      data  ───────────────────────────────────────►
//!      result ◄──────────────────────────────────────
//! ```
//!
//! - [`slot`]: one data/result exchange cell;
//! - [`queue`]: FIFO of slots with an open tail;
//! - [`shared`]: queue plus termination flag, shared by controller and driver.

mod queue;
mod shared;
mod slot;

pub(crate) use shared::Shared;
pub(crate) use slot::DataOutcome;
