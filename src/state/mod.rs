//! State management module
//!
//! The countdown engine, its derived display snapshot, and the shared
//! application state that publishes them.

pub mod app_state;
pub mod engine;
pub mod snapshot;

// Re-export main types
pub use app_state::AppState;
pub use engine::{Phase, TickOutcome, TimerEngine, TimerState};
pub use snapshot::{PhaseInfo, TimerSnapshot};
