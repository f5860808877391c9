//! Signal handling for graceful shutdown

use anyhow::Context;
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve once SIGTERM or SIGINT arrives
pub async fn shutdown_signal() -> anyhow::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT]).context("Failed to register signal handler")?;
    let handle = signals.handle();

    if let Some(signal) = signals.next().await {
        let name = match signal {
            SIGTERM => "SIGTERM",
            SIGINT => "SIGINT",
            _ => "unknown",
        };
        info!("Received {} ({})", name, signal);
    }

    handle.close();
    Ok(())
}
