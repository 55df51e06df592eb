//! Main application state management

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::config::Config;

use super::{TickOutcome, TimerEngine, TimerSnapshot};

/// Main application state wrapping the countdown engine and its channels
#[derive(Debug)]
pub struct AppState {
    /// The countdown engine; all mutation goes through this lock
    engine: Mutex<TimerEngine>,
    /// Countdown update interval in milliseconds
    pub tick_interval_ms: u64,
    /// Alarm sound label, echoed on the status endpoint
    pub alarm_label: String,
    /// Optional command launched when the alarm sounds
    pub alarm_command: Option<String>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Display snapshot published on every observable timer change
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Discrete completion events for the alarm collaborator
    finished_tx: broadcast::Sender<()>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState from the parsed configuration
    pub fn new(config: &Config) -> Self {
        let engine = TimerEngine::new(config.phases());
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (finished_tx, _) = broadcast::channel(16);

        Self {
            engine: Mutex::new(engine),
            tick_interval_ms: config.interval,
            alarm_label: config.alarm.clone(),
            alarm_command: config.alarm_command.clone(),
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            snapshot_tx,
            finished_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Begin counting down the current phase
    pub fn start(&self) -> Result<(TimerSnapshot, bool), String> {
        info!("Start requested");
        self.apply("start", |engine, now| engine.start(now))
    }

    /// Freeze the countdown at its current value
    pub fn pause(&self) -> Result<(TimerSnapshot, bool), String> {
        info!("Pause requested");
        self.apply("pause", |engine, _| engine.pause())
    }

    /// Continue a paused countdown
    pub fn resume(&self) -> Result<(TimerSnapshot, bool), String> {
        info!("Resume requested");
        self.apply("resume", |engine, now| engine.resume(now))
    }

    /// Abandon the countdown and return to idle
    pub fn cancel(&self) -> Result<(TimerSnapshot, bool), String> {
        info!("Cancel requested");
        self.apply("cancel", |engine, _| engine.cancel())
    }

    /// Adjust a phase length by whole minutes (idle only)
    pub fn adjust_length(
        &self,
        phase_index: usize,
        delta_minutes: i64,
    ) -> Result<(TimerSnapshot, bool), String> {
        info!(
            "Length adjustment requested: phase {} by {:+} minute(s)",
            phase_index, delta_minutes
        );
        self.apply("adjust-length", |engine, _| {
            engine.adjust_length(phase_index, delta_minutes)
        })
    }

    /// Advance the countdown using the wall clock
    pub fn tick(&self) -> Result<TickOutcome, String> {
        self.tick_at(epoch_ms())
    }

    /// Advance the countdown to a specific epoch-millisecond timestamp
    pub fn tick_at(&self, now_ms: u64) -> Result<TickOutcome, String> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        let outcome = engine.tick(now_ms);
        let snapshot = engine.snapshot();
        drop(engine);

        match outcome {
            TickOutcome::Unchanged => {}
            TickOutcome::Updated => {
                debug!("Countdown at {}", snapshot.clock);
                self.publish(snapshot);
            }
            TickOutcome::Finished => {
                info!("Countdown finished, next up: {}", snapshot.phase_name);
                self.record_action("finished");
                self.publish(snapshot);
                if let Err(e) = self.finished_tx.send(()) {
                    debug!("No alarm listeners for finish event: {}", e);
                }
            }
        }

        Ok(outcome)
    }

    /// Get the current display snapshot
    pub fn current_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine
            .lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Subscribe to display snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to completion events
    pub fn subscribe_finished(&self) -> broadcast::Receiver<()> {
        self.finished_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Apply a transition to the engine; publish and record it if it took
    fn apply<F>(&self, action: &str, transition: F) -> Result<(TimerSnapshot, bool), String>
    where
        F: FnOnce(&mut TimerEngine, u64) -> bool,
    {
        let mut engine = self
            .engine
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        let applied = transition(&mut engine, epoch_ms());
        let snapshot = engine.snapshot();
        drop(engine);

        if applied {
            self.record_action(action);
            self.publish(snapshot.clone());
        } else {
            debug!("Transition {:?} ignored in {:?} state", action, snapshot.state);
        }

        Ok((snapshot, applied))
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish timer snapshot: {}", e);
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

/// Current wall-clock time in epoch milliseconds
fn epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}
