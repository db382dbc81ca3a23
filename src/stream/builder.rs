use std::{borrow::Cow, future::Future, sync::Arc};

use crate::{config::Config, controller::Controller, events::Bus};

use super::driver::SlotStream;

/// Builder for constructing a [`SlotStream`] with a name and optional event bus.
#[derive(Clone, Debug, Default)]
pub struct SlotStreamBuilder {
    cfg: Config,
    bus: Option<Bus>,
}

impl SlotStreamBuilder {
    /// Creates a builder with the default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the sequence name used in events.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Publishes events to a shared bus instead of a private one.
    ///
    /// Takes precedence over [`Config::bus_capacity`](crate::Config::bus_capacity).
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the sequence around `producer`.
    ///
    /// `producer` is called immediately with the sequence's [`Controller`];
    /// the returned future is first polled on the first pull.
    pub fn build<T, R, N, E, F, Fut>(self, producer: F) -> SlotStream<T, R, N, E>
    where
        F: FnOnce(Controller<T, R, N, E>) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        let bus = self.bus.or_else(|| self.cfg.bus_capacity().map(Bus::new));
        let name: Arc<str> = Arc::from(self.cfg.name.as_ref());
        SlotStream::from_parts(name, bus, producer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle(_ctl: Controller<u8>) -> impl Future<Output = Result<(), ()>> + Send + 'static {
        async { Ok(()) }
    }

    #[test]
    fn test_default_build_has_no_bus() {
        let seq = SlotStreamBuilder::new().build(idle);
        assert_eq!(seq.name(), "sequence");
        assert!(seq.bus().is_none());
        assert!(seq.subscribe().is_none());
    }

    #[test]
    fn test_bus_capacity_creates_private_bus() {
        let seq = SlotStreamBuilder::new()
            .with_config(Config {
                name: "numbers".into(),
                bus_capacity: 16,
            })
            .build(idle);
        assert_eq!(seq.name(), "numbers");
        assert!(seq.subscribe().is_some());
    }

    #[test]
    fn test_shared_bus_takes_precedence() {
        let bus = Bus::new(8);
        let seq = SlotStreamBuilder::new()
            .with_name("shared")
            .with_bus(bus.clone())
            .build(idle);
        let _rx = seq.subscribe();
        assert_eq!(bus.receiver_count(), 1);
    }
}
