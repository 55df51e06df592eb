//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod alarm;
pub mod tick;

// Re-export main functions
pub use alarm::alarm_task;
pub use tick::countdown_tick_task;
