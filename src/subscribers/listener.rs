use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

use crate::events::{Bus, Event};

use super::Subscribe;

/// Spawns a worker forwarding every event of `bus` to `subscriber`.
///
/// ### Rules
/// - Events published before this call are not delivered.
/// - Lagged events are skipped and reported as `SubscriberOverflow`.
/// - A panic inside `on_event` is caught and reported as `SubscriberPanicked`;
///   the worker keeps running.
/// - The worker does not keep the bus open; it exits once every other bus
///   sender is gone.
///
/// Must be called within a tokio runtime.
pub fn listen(bus: &Bus, subscriber: Arc<dyn Subscribe>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    let reporter = bus.downgrade();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    let fut = subscriber.on_event(&ev);
                    if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                        // A panic on its own report is not re-published.
                        if ev.is_subscriber_event() {
                            continue;
                        }
                        let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        report(&reporter, Event::subscriber_panicked(subscriber.name(), info));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    report(&reporter, Event::subscriber_overflow(subscriber.name(), skipped));
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn report(reporter: &broadcast::WeakSender<Event>, ev: Event) {
    if let Some(tx) = reporter.upgrade() {
        let _ = tx.send(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::{sync::Mutex, time::Duration};

    #[derive(Default)]
    struct Recorder {
        kinds: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            if matches!(ev.kind, EventKind::ConsumerThrew) {
                panic!("recorder refuses throws");
            }
            self.kinds.lock().unwrap().push(ev.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test]
    async fn test_listener_reports_panics_on_the_bus() {
        let bus = Bus::new(16);
        let mut observer = bus.subscribe();
        let recorder = Arc::new(Recorder::default());
        let worker = listen(&bus, recorder.clone());

        bus.publish(Event::new(EventKind::SequenceStarted));
        bus.publish(Event::new(EventKind::ConsumerThrew));
        bus.publish(Event::new(EventKind::SequenceClosed));

        let panicked = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let ev = observer.recv().await.unwrap();
                if ev.kind == EventKind::SubscriberPanicked {
                    return ev;
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(panicked.subscriber, Some("recorder"));
        assert_eq!(panicked.reason.as_deref(), Some("recorder refuses throws"));

        drop(observer);
        drop(bus);
        worker.await.unwrap();
        assert_eq!(
            *recorder.kinds.lock().unwrap(),
            vec![
                EventKind::SequenceStarted,
                EventKind::SequenceClosed,
                EventKind::SubscriberPanicked,
            ]
        );
    }

    #[tokio::test]
    async fn test_listener_reports_lag() {
        let bus = Bus::new(2);
        let mut observer = bus.subscribe();
        let recorder = Arc::new(Recorder::default());
        let worker = listen(&bus, recorder.clone());

        // Current-thread runtime: the worker does not run before the first await.
        for _ in 0..5 {
            bus.publish(Event::new(EventKind::ItemDelivered));
        }

        let overflow = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                match observer.recv().await {
                    Ok(ev) if ev.kind == EventKind::SubscriberOverflow => return ev,
                    Ok(_) | Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => panic!("bus closed"),
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(overflow.subscriber, Some("recorder"));
        assert_eq!(overflow.item, Some(3));

        drop(observer);
        drop(bus);
        worker.await.unwrap();
    }
}
