use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Engine;

/// Runs [`Engine::sweep`] every sweep interval until `abort` is set or the
/// handle is aborted. Must be called from within a tokio runtime.
pub fn spawn_sweeper(engine: Arc<Engine>, abort: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(engine.sweep_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if abort.load(Ordering::Relaxed) {
                tracing::debug!("sweeper stopped");
                break;
            }
            engine.sweep(Instant::now());
        }
    })
}
