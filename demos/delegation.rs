//! # Example: delegation
//!
//! A producer forwarding whole sources, consumed as a plain [`Stream`] and
//! stopped early by the consumer.
//!
//! Demonstrates how to:
//! - Delegate to an iterator with [`Controller::emit_all`].
//! - Delegate to an async source with [`Controller::emit_stream`].
//! - Stop early: the producer's pending emission observes `Cancelled`.
//!
//! ## Run
//! ```bash
//! cargo run --example delegation
//! ```

use futures::{StreamExt, stream};
use slotstream::{Controller, ResumeSignal, SlotStream};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut words = SlotStream::new(|ctl: Controller<String, (), (), String>| async move {
        // 1. Synchronous source
        if ctl.emit_all(["alpha", "beta"].map(String::from)).await?.is_cancelled() {
            println!("[producer] stopped during the iterator");
            return Ok(());
        }

        // 2. Asynchronous source
        let words = stream::iter(["gamma", "delta", "epsilon"].map(String::from));
        match ctl.emit_stream(words).await? {
            ResumeSignal::Cancelled => println!("[producer] stopped during the stream"),
            ResumeSignal::Resumed(_) => {
                let _ = ctl.complete(()).await;
            }
        }
        Ok(())
    });

    // 3. Take four words, then close
    let taken: Vec<String> = (&mut words)
        .take(4)
        .map(|w| w.unwrap_or_else(|e| format!("<error: {e}>")))
        .collect()
        .await;
    println!("[consumer] took {taken:?}");

    words
        .close()
        .await
        .map_err(|e| anyhow::anyhow!("producer failed: {e}"))?;
    Ok(())
}
