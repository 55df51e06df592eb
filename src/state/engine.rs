//! Countdown state machine
//!
//! The engine is pure and synchronous: every operation that depends on the
//! wall clock takes the current epoch-millisecond timestamp as an argument.
//! Remaining time is always recomputed from the absolute end timestamp, so a
//! late or skipped tick self-corrects instead of drifting.

use serde::{Deserialize, Serialize};

use crate::utils::format::{minutes_to_ms, ms_to_minutes};

use super::snapshot::TimerSnapshot;

/// One phase of the countdown cycle (e.g. Session, Break)
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: String,
    pub duration_ms: u64,
}

impl Phase {
    /// Create a phase from a length in whole minutes
    pub fn from_minutes(name: impl Into<String>, minutes: u64) -> Self {
        Self {
            name: name.into(),
            duration_ms: minutes_to_ms(minutes),
        }
    }
}

/// Timer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    /// Check whether ticks should currently be scheduled
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

/// Result of delivering one tick to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining time did not change; nothing to publish
    Unchanged,
    /// Remaining time changed and the countdown continues
    Updated,
    /// Remaining time reached zero; the alarm should sound exactly once
    Finished,
}

/// Countdown engine owning the phase list and transition rules.
///
/// Transitions delivered in a state where they are not valid are silent
/// no-ops returning `false`; the caller decides whether that is worth
/// reporting. Completion is signalled through [`TickOutcome::Finished`]
/// rather than a stored state: the engine is already back in `Idle` (at the
/// next phase, when more than one is configured) by the time the caller
/// observes it.
#[derive(Debug)]
pub struct TimerEngine {
    phases: Vec<Phase>,
    phase_index: usize,
    state: TimerState,
    /// Length of the current phase, copied from the phase list on selection
    duration_ms: u64,
    /// Cached countdown value; authoritative while paused
    remaining_ms: u64,
    /// Epoch ms when the running interval began; 0 while idle
    start_ms: u64,
    /// Epoch ms when the running interval is due to end; 0 while idle
    end_ms: u64,
}

impl TimerEngine {
    /// Create an idle engine positioned at phase 0.
    ///
    /// Panics on an empty phase list or a zero-length phase; both indicate a
    /// caller bug, not a runtime condition.
    pub fn new(phases: Vec<Phase>) -> Self {
        assert!(!phases.is_empty(), "timer requires at least one phase");
        for phase in &phases {
            assert!(
                phase.duration_ms > 0,
                "phase {:?} has a zero duration",
                phase.name
            );
        }

        let mut engine = Self {
            phases,
            phase_index: 0,
            state: TimerState::Idle,
            duration_ms: 0,
            remaining_ms: 0,
            start_ms: 0,
            end_ms: 0,
        };
        engine.select_phase(0);
        engine
    }

    /// Begin counting down the current phase. Valid from `Idle` only.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }

        self.remaining_ms = self.duration_ms;
        self.start_ms = now_ms;
        self.end_ms = now_ms + self.duration_ms;
        self.state = TimerState::Running;
        true
    }

    /// Freeze the countdown at its last computed value. Valid from `Running`.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.state = TimerState::Paused;
        true
    }

    /// Continue a paused countdown, re-basing the end timestamp from the
    /// frozen remaining time. Valid from `Paused`.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }

        self.end_ms = now_ms + self.remaining_ms;
        self.state = TimerState::Running;
        true
    }

    /// Abandon the countdown and return to idle with the current phase
    /// reloaded in full. Valid from `Running` and `Paused`.
    pub fn cancel(&mut self) -> bool {
        if self.state == TimerState::Idle {
            return false;
        }

        self.remaining_ms = self.duration_ms;
        self.start_ms = 0;
        self.end_ms = 0;
        self.state = TimerState::Idle;
        true
    }

    /// Adjust a phase length by whole minutes. Only honoured while idle, and
    /// only when the new length stays within 1..=60 minutes; otherwise the
    /// step is ignored and `false` is returned. Adjusting the current phase
    /// also refreshes the working duration and remaining time.
    pub fn adjust_length(&mut self, phase_index: usize, delta_minutes: i64) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        if phase_index >= self.phases.len() {
            return false;
        }

        let minutes = ms_to_minutes(self.phases[phase_index].duration_ms) as i64 + delta_minutes;
        if !(1..=60).contains(&minutes) {
            return false;
        }

        self.phases[phase_index].duration_ms = minutes_to_ms(minutes as u64);
        if phase_index == self.phase_index {
            self.duration_ms = self.phases[phase_index].duration_ms;
            self.remaining_ms = self.duration_ms;
        }
        true
    }

    /// Recompute remaining time from the end timestamp.
    ///
    /// Reaching zero returns [`TickOutcome::Finished`] once: the engine goes
    /// back to idle, advancing to the next phase when more than one is
    /// configured. Ticks delivered outside `Running` are no-ops.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Unchanged;
        }

        let remaining = self.end_ms.saturating_sub(now_ms).min(self.duration_ms);
        if remaining == self.remaining_ms {
            return TickOutcome::Unchanged;
        }
        self.remaining_ms = remaining;

        if remaining > 0 {
            return TickOutcome::Updated;
        }

        self.state = TimerState::Idle;
        if self.phases.len() > 1 {
            let next = (self.phase_index + 1) % self.phases.len();
            self.select_phase(next);
        } else {
            // Single phase: stay at zero so the face shows 00:00 until the
            // next start reloads the duration
            self.start_ms = 0;
            self.end_ms = 0;
        }
        TickOutcome::Finished
    }

    /// Derive the full display snapshot for the view layer
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::derive(
            self.state,
            self.phase_index,
            &self.phases,
            self.duration_ms,
            self.remaining_ms,
            self.start_ms,
            self.end_ms,
        )
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn select_phase(&mut self, index: usize) {
        self.phase_index = index;
        self.duration_ms = self.phases[index].duration_ms;
        self.remaining_ms = self.duration_ms;
        self.start_ms = 0;
        self.end_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::format::MS_PER_MINUTE;

    fn pomodoro() -> TimerEngine {
        TimerEngine::new(vec![
            Phase::from_minutes("Session", 25),
            Phase::from_minutes("Break", 5),
        ])
    }

    fn one_minute() -> TimerEngine {
        TimerEngine::new(vec![Phase::from_minutes("Session", 1)])
    }

    #[test]
    fn starts_with_full_remaining_time() {
        for minutes in [1, 25, 60] {
            let mut engine = TimerEngine::new(vec![Phase::from_minutes("Session", minutes)]);
            assert!(engine.start(1_000));
            assert_eq!(engine.state(), TimerState::Running);
            assert_eq!(engine.remaining_ms(), minutes * MS_PER_MINUTE);
        }
    }

    #[test]
    fn start_is_ignored_unless_idle() {
        let mut engine = pomodoro();
        assert!(engine.start(0));
        assert!(!engine.start(1_000));
        assert_eq!(engine.state(), TimerState::Running);

        assert!(engine.pause());
        assert!(!engine.start(2_000));
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut engine = pomodoro();
        engine.start(0);
        engine.tick(60_000);
        let frozen = engine.remaining_ms();

        assert!(engine.pause());
        assert!(!engine.pause());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_ms(), frozen);
    }

    #[test]
    fn pause_freezes_remaining_across_ticks() {
        let mut engine = pomodoro();
        engine.start(0);
        engine.tick(10_000);
        engine.pause();

        assert_eq!(engine.tick(20_000), TickOutcome::Unchanged);
        assert_eq!(engine.remaining_ms(), 25 * MS_PER_MINUTE - 10_000);
    }

    #[test]
    fn resume_is_ignored_unless_paused() {
        let mut engine = pomodoro();
        assert!(!engine.resume(0));
        engine.start(0);
        assert!(!engine.resume(1_000));
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn resume_excludes_paused_time_from_the_countdown() {
        let duration = 25 * MS_PER_MINUTE;
        let mut engine = pomodoro();
        engine.start(0);
        engine.tick(60_000);
        engine.pause();

        // Four minutes pass on the wall clock before the resume
        assert!(engine.resume(300_000));
        assert_eq!(engine.state(), TimerState::Running);

        // The countdown still ends after exactly `duration` of running time
        let end = 300_000 + (duration - 60_000);
        assert_eq!(engine.tick(end - 1_000), TickOutcome::Updated);
        assert_eq!(engine.remaining_ms(), 1_000);
        assert_eq!(engine.tick(end), TickOutcome::Finished);
    }

    #[test]
    fn cancel_reloads_the_current_phase() {
        let mut engine = pomodoro();
        engine.start(0);
        engine.tick(60_000);

        assert!(engine.cancel());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_ms(), 25 * MS_PER_MINUTE);
        assert_eq!(engine.phase_index(), 0);

        engine.start(100_000);
        engine.pause();
        assert!(engine.cancel());
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(!engine.cancel());
    }

    #[test]
    fn remaining_is_monotone_and_never_negative() {
        let mut engine = one_minute();
        engine.start(0);

        let mut last = engine.remaining_ms();
        for now in [500, 1_000, 1_500, 3_000, 3_000, 59_999, 60_000, 75_000] {
            engine.tick(now);
            assert!(engine.remaining_ms() <= last);
            last = engine.remaining_ms();
        }
    }

    #[test]
    fn identical_ticks_report_no_change() {
        let mut engine = one_minute();
        engine.start(0);

        assert_eq!(engine.tick(1_000), TickOutcome::Updated);
        assert_eq!(engine.tick(1_000), TickOutcome::Unchanged);
        assert_eq!(engine.remaining_ms(), 59_000);
    }

    #[test]
    fn ticks_outside_running_are_ignored() {
        let mut engine = pomodoro();
        assert_eq!(engine.tick(5_000), TickOutcome::Unchanged);
        assert_eq!(engine.remaining_ms(), 25 * MS_PER_MINUTE);
    }

    #[test]
    fn single_phase_finish_returns_to_idle_at_zero() {
        let mut engine = one_minute();
        engine.start(0);

        let mut finishes = 0;
        for step in 1..=75 {
            if engine.tick(step * 1_000) == TickOutcome::Finished {
                finishes += 1;
            }
        }

        assert_eq!(finishes, 1);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase_index(), 0);
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn finishing_cycles_through_the_phase_list() {
        let mut engine = pomodoro();
        engine.start(0);
        assert_eq!(engine.tick(25 * MS_PER_MINUTE), TickOutcome::Finished);

        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase_index(), 1);
        assert_eq!(engine.duration_ms(), 5 * MS_PER_MINUTE);
        assert_eq!(engine.remaining_ms(), 5 * MS_PER_MINUTE);

        engine.start(2_000_000);
        assert_eq!(engine.tick(2_000_000 + 5 * MS_PER_MINUTE), TickOutcome::Finished);
        assert_eq!(engine.phase_index(), 0);
        assert_eq!(engine.duration_ms(), 25 * MS_PER_MINUTE);
    }

    #[test]
    fn one_minute_session_scenario() {
        let mut engine = one_minute();
        engine.start(0);

        assert_eq!(engine.tick(1_000), TickOutcome::Updated);
        assert_eq!(engine.remaining_ms(), 59_000);

        let mut finishes = 0;
        for step in 2..=60 {
            if engine.tick(step * 1_000) == TickOutcome::Finished {
                finishes += 1;
            }
        }

        assert_eq!(finishes, 1);
        assert_eq!(engine.remaining_ms(), 0);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn adjust_updates_the_current_phase_in_place() {
        let mut engine = pomodoro();
        assert!(engine.adjust_length(0, 1));
        assert_eq!(engine.duration_ms(), 26 * MS_PER_MINUTE);
        assert_eq!(engine.remaining_ms(), 26 * MS_PER_MINUTE);

        assert!(engine.adjust_length(0, -2));
        assert_eq!(engine.duration_ms(), 24 * MS_PER_MINUTE);
    }

    #[test]
    fn adjusting_another_phase_leaves_the_working_duration_alone() {
        let mut engine = pomodoro();
        assert!(engine.adjust_length(1, 1));
        assert_eq!(engine.phases()[1].duration_ms, 6 * MS_PER_MINUTE);
        assert_eq!(engine.duration_ms(), 25 * MS_PER_MINUTE);
    }

    #[test]
    fn adjust_is_rejected_outside_idle() {
        let mut engine = pomodoro();
        engine.start(0);
        assert!(!engine.adjust_length(0, 1));
        assert_eq!(engine.duration_ms(), 25 * MS_PER_MINUTE);

        engine.pause();
        assert!(!engine.adjust_length(0, 1));
        assert_eq!(engine.duration_ms(), 25 * MS_PER_MINUTE);
    }

    #[test]
    fn adjust_ignores_steps_out_of_bounds() {
        let mut engine = TimerEngine::new(vec![
            Phase::from_minutes("Session", 60),
            Phase::from_minutes("Break", 1),
        ]);

        assert!(!engine.adjust_length(0, 1));
        assert_eq!(engine.phases()[0].duration_ms, 60 * MS_PER_MINUTE);

        assert!(!engine.adjust_length(1, -1));
        assert_eq!(engine.phases()[1].duration_ms, MS_PER_MINUTE);
    }

    #[test]
    fn adjust_ignores_an_unknown_phase_index() {
        let mut engine = pomodoro();
        assert!(!engine.adjust_length(2, 1));
    }

    #[test]
    #[should_panic(expected = "at least one phase")]
    fn rejects_an_empty_phase_list() {
        TimerEngine::new(Vec::new());
    }

    #[test]
    #[should_panic(expected = "zero duration")]
    fn rejects_a_zero_length_phase() {
        TimerEngine::new(vec![Phase {
            name: "Session".to_string(),
            duration_ms: 0,
        }]);
    }
}
