//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::Phase;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "take-five")]
#[command(about = "A state-managed HTTP server for Pomodoro countdown timing")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25055")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Session phase length in minutes
    #[arg(short, long, default_value = "25")]
    pub session: u64,

    /// Break phase length in minutes (0 disables the break phase)
    #[arg(short = 'b', long = "break", default_value = "5")]
    pub break_minutes: u64,

    /// Countdown update interval in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub interval: u64,

    /// Alarm sound label reported when the timer ends
    #[arg(long, default_value = "Radar")]
    pub alarm: String,

    /// Command launched when the alarm sounds, e.g. "paplay /usr/share/sounds/bell.oga"
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Check the configured lengths before the engine asserts on them
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=60).contains(&self.session) {
            return Err(format!(
                "Session length must be between 1 and 60 minutes, got {}",
                self.session
            ));
        }
        if self.break_minutes > 60 {
            return Err(format!(
                "Break length must be at most 60 minutes, got {}",
                self.break_minutes
            ));
        }
        if self.interval == 0 {
            return Err("Update interval must be at least 1 millisecond".to_string());
        }
        Ok(())
    }

    /// Build the phase list for the countdown engine
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = vec![Phase::from_minutes("Session", self.session)];
        if self.break_minutes > 0 {
            phases.push(Phase::from_minutes("Break", self.break_minutes));
        }
        phases
    }
}
