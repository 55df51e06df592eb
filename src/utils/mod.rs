//! Utility functions module
//!
//! Shared helpers for time conversion, clock formatting, and process signals.

pub mod format;
pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
