//! Alarm background task

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{services::play_alarm_command, state::AppState};

/// Background task that reacts to countdown completion events by sounding
/// the configured alarm. Playback failures are logged, never propagated.
pub async fn alarm_task(state: Arc<AppState>) {
    info!("Starting alarm task");

    let mut finished_rx = state.subscribe_finished();

    loop {
        match finished_rx.recv().await {
            Ok(()) => {
                info!("Timer finished, sounding alarm: {}", state.alarm_label);
                if let Some(command) = &state.alarm_command {
                    if let Err(e) = play_alarm_command(command).await {
                        warn!("Alarm playback failed: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alarm task lagged, {} finish event(s) dropped", skipped);
            }
            Err(RecvError::Closed) => {
                error!("Finish channel closed, stopping alarm task");
                return;
            }
        }
    }
}
