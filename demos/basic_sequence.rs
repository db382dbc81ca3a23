//! # Example: basic_sequence
//!
//! A producer emitting a few numbers, pulled one by one, with every lifecycle
//! event printed by the built-in [`LogWriter`].
//!
//! Demonstrates how to:
//! - Give a sequence a name and a private event bus through [`Config`].
//! - Attach a subscriber with [`listen`].
//! - Pull items with [`SlotStream::resume`] and read the final value.
//!
//! ## Flow
//! ```text
//! SlotStream::builder().build(producer)
//!     ├─► resume() ─► publish(SequenceStarted), publish(ItemDelivered)
//!     ├─► resume() ─► publish(ConsumerResumed), publish(ItemDelivered)
//!     ├─► ...
//!     └─► resume() ─► publish(ProducerCompleted)
//!                     ├─► publish(SlotsDrained)
//!                     ├─► publish(ProducerSettled)
//!                     └─► publish(SequenceClosed)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_sequence --features logging
//! ```

use std::sync::Arc;

use slotstream::{Config, Controller, LogWriter, Produced, SlotStream, subscribers::listen};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Named sequence with its own event bus
    let cfg = Config {
        name: "numbers".into(),
        bus_capacity: 64,
    };

    // 2. Producer: three numbers, then their sum as the final value
    let mut seq = SlotStream::builder()
        .with_config(cfg)
        .build(|ctl: Controller<u32, u32>| async move {
            let mut sum = 0;
            for n in [3, 5, 8] {
                println!("[producer] emitting {n}");
                if ctl.emit(n).await?.is_cancelled() {
                    return Ok(());
                }
                sum += n;
            }
            let _ = ctl.complete(sum).await;
            Ok(())
        });

    // 3. Print every event
    let bus = seq.bus().cloned().ok_or_else(|| anyhow::anyhow!("sequence has no bus"))?;
    let logger = listen(&bus, Arc::new(LogWriter::new()));
    drop(bus);

    // 4. Pull until the producer completes
    while let Some(step) = seq.resume(()).await {
        match step {
            Ok(Produced::Value(n)) => println!("[consumer] got {n}"),
            Ok(Produced::Done(sum)) => println!("[consumer] sum = {sum}"),
            Err(()) => anyhow::bail!("producer failed"),
        }
    }

    // 5. Dropping the sequence closes the bus; the logger drains and exits
    drop(seq);
    logger.await?;
    Ok(())
}
