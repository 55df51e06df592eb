//! Countdown tick background task

use std::{sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Background task that drives the countdown while the timer is running.
///
/// A periodic tick is scheduled only while the published state is Running.
/// Pause and cancel take effect by publishing a snapshot that breaks the
/// inner loop before any further tick fires, so at most one scheduled tick
/// exists per engine and starting twice cannot double the cadence.
pub async fn countdown_tick_task(state: Arc<AppState>) {
    info!("Starting countdown tick task");

    let mut snapshot_rx = state.subscribe_snapshots();

    loop {
        // Wait for the timer to enter the running state
        if !snapshot_rx.borrow_and_update().state.is_running() {
            if snapshot_rx.changed().await.is_err() {
                error!("Snapshot channel closed, stopping tick task");
                return;
            }
            continue;
        }

        debug!(
            "Timer running, scheduling ticks every {}ms",
            state.tick_interval_ms
        );
        let mut ticks = interval(Duration::from_millis(state.tick_interval_ms));
        // An interval's first tick completes immediately; consume it so the
        // countdown first updates a full interval after the start
        ticks.tick().await;

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match state.tick() {
                        Ok(TickOutcome::Finished) => {
                            debug!("Countdown reached zero, cancelling scheduled ticks");
                            break;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to advance countdown: {}", e);
                            break;
                        }
                    }
                }

                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        error!("Snapshot channel closed, stopping tick task");
                        return;
                    }
                    if !snapshot_rx.borrow_and_update().state.is_running() {
                        debug!("Timer left the running state, cancelling scheduled ticks");
                        break;
                    }
                }
            }
        }
    }
}
