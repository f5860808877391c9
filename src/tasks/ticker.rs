//! Countdown tick loop

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

use crate::state::engine::Shared;

/// Fixed period between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Spawn the tick task for schedule `generation`.
///
/// The first tick fires one full interval after the call. Late ticks are
/// delayed rather than bunched, so a stalled runtime never fast-forwards the
/// countdown.
pub(crate) fn spawn_ticker(shared: Arc<Shared>, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Tick schedule {} armed", generation);

        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match shared.tick(generation) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!("Tick failed: {}", e);
                    break;
                }
            }
        }

        debug!("Tick schedule {} finished", generation);
    })
}
