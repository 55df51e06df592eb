//! Alarm sound playback
//!
//! The engine treats the alarm as fire-and-forget: it emits a completion
//! event and this module turns the event into a player process.

use tokio::process::Command;
use tracing::{debug, info};

/// Run the configured alarm player command to completion
pub async fn play_alarm_command(command: &str) -> Result<(), String> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| "Alarm command is empty".to_string())?;

    debug!("Launching alarm player: {}", command);

    let output = Command::new(program)
        .args(parts)
        .output()
        .await
        .map_err(|e| format!("Failed to execute alarm player: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("Alarm player failed: {}", stderr));
    }

    info!("Alarm playback completed");
    Ok(())
}
