//! Duel client binary.
//!
//! Runs one headless match and prints its events to stdout.
//!
//! # Examples
//!
//! ```bash
//! # Instant match with a fixed seed, JSON events
//! DUEL_SEED=7 DUEL_JSON_EVENTS=1 DUEL_POST_SHOT_FLASH_MS=0 \
//!     DUEL_INTER_TURN_PAUSE_MS=0 DUEL_AI_THINKING_MS=0 cargo run -p duel-client
//! ```

use anyhow::{Context, Result};
use tokio::sync::broadcast;

use duel_client::{ClientConfig, HeadlessMatch, logging, presentation};
use runtime::{Event, Runtime, RuntimeConfig, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    let runtime_config = RuntimeConfig::from_env();
    let runtime = Runtime::builder()
        .config(runtime_config)
        .build()
        .await
        .context("failed to build runtime")?;
    tracing::info!(seed = runtime.seed(), "runtime started");

    let handle = runtime.handle();
    let receivers = handle.subscribe_multiple(&Topic::ALL);
    let printers: Vec<_> = receivers
        .into_values()
        .map(|rx| tokio::spawn(print_events(rx, config.json_events)))
        .collect();

    let summary = HeadlessMatch::new(handle, runtime.seed(), config.max_turns)
        .run()
        .await?;

    runtime
        .shutdown()
        .await
        .context("runtime did not shut down cleanly")?;
    for printer in printers {
        printer.await.context("event printer panicked")??;
    }

    match &summary.outcome {
        Some(outcome) => println!("{}", presentation::describe_outcome(outcome)),
        None => println!("no winner after {} turns", summary.turns),
    }

    Ok(())
}

/// Prints events until the runtime closes the bus.
async fn print_events(mut rx: broadcast::Receiver<Event>, json: bool) -> Result<()> {
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event printer fell behind");
                continue;
            }
        };

        if json {
            println!("{}", event.to_json()?);
        } else {
            for line in presentation::describe(&event) {
                println!("{line}");
            }
        }
    }
}
