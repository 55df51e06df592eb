//! Derived display snapshot
//!
//! All view-facing values (elapsed, progress, clock faces, paused time) are
//! computed here in one place so every consumer of a tick observes the same
//! numbers.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format::{format_clock, ms_to_minutes, percent_of};

use super::engine::{Phase, TimerState};

/// Phase summary for settings display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub name: String,
    pub minutes: u64,
}

/// Full display snapshot published on every observable timer change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub phase_index: usize,
    pub phase_name: String,
    pub phases: Vec<PhaseInfo>,
    pub duration_ms: u64,
    pub remaining_ms: u64,
    pub elapsed_ms: u64,
    /// Floor percentage of remaining time, 100 at start and 0 at completion
    pub progress_percent: u32,
    /// Remaining time as a zero-padded mm:ss clock face
    pub clock: String,
    /// Wall-clock time spent paused across the current run
    pub paused_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub ending_at: Option<DateTime<Utc>>,
}

impl TimerSnapshot {
    /// Derive a snapshot from raw engine fields
    pub(crate) fn derive(
        state: TimerState,
        phase_index: usize,
        phases: &[Phase],
        duration_ms: u64,
        remaining_ms: u64,
        start_ms: u64,
        end_ms: u64,
    ) -> Self {
        // The end timestamp only moves past start + duration when a resume
        // has pushed it back, so the difference is the total paused time
        let paused_ms = end_ms.saturating_sub(start_ms).saturating_sub(duration_ms);

        let (started_at, ending_at) = if state == TimerState::Idle {
            (None, None)
        } else {
            (epoch_to_datetime(start_ms), epoch_to_datetime(end_ms))
        };

        Self {
            state,
            phase_index,
            phase_name: phases[phase_index].name.clone(),
            phases: phases
                .iter()
                .map(|phase| PhaseInfo {
                    name: phase.name.clone(),
                    minutes: ms_to_minutes(phase.duration_ms),
                })
                .collect(),
            duration_ms,
            remaining_ms,
            elapsed_ms: duration_ms.saturating_sub(remaining_ms),
            progress_percent: percent_of(remaining_ms, duration_ms),
            clock: format_clock(remaining_ms),
            paused_ms,
            started_at,
            ending_at,
        }
    }
}

fn epoch_to_datetime(ms: u64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms as i64).single()
}
