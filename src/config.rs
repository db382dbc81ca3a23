//! # Per-sequence configuration.
//!
//! Provides [`Config`] settings applied when a [`SlotStream`](crate::SlotStream) is built.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → no private event bus (events are only published
//!   when a shared bus is given to the builder)

use std::borrow::Cow;

/// Configuration of one adapted sequence.
///
/// ## Field semantics
/// - `name`: label carried by every event of the sequence
/// - `bus_capacity`: capacity of a private event bus (`0` = none)
#[derive(Clone, Debug)]
pub struct Config {
    /// Sequence label used in events.
    pub name: Cow<'static, str>,

    /// Capacity of a private event bus ring buffer.
    ///
    /// - `0` = no private bus
    /// - `n > 0` = the sequence owns a bus of capacity `n`, reachable through
    ///   [`SlotStream::subscribe`](crate::SlotStream::subscribe)
    ///
    /// Ignored when a shared bus is passed to the builder.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the private bus capacity as an `Option`.
    ///
    /// - `None` → no private bus
    /// - `Some(n)` → bus with capacity `n`
    #[inline]
    pub fn bus_capacity(&self) -> Option<usize> {
        if self.bus_capacity == 0 {
            None
        } else {
            Some(self.bus_capacity)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "sequence"`
    /// - `bus_capacity = 0` (no events)
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("sequence"),
            bus_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_bus() {
        let cfg = Config::default();
        assert_eq!(cfg.name, "sequence");
        assert_eq!(cfg.bus_capacity(), None);
    }

    #[test]
    fn test_bus_capacity_sentinel() {
        let cfg = Config {
            bus_capacity: 64,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity(), Some(64));
    }
}
