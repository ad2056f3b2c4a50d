//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::Parser;

pub use defaults::{
    DEFAULT_DEVICE_INDEX, DEFAULT_DURATION_SECS, DEFAULT_INTERVAL_MS, DEFAULT_SAMPLE_RATE_HZ,
    MAX_DURATION_SECS, MAX_INTERVAL_MS, MAX_SAMPLE_RATE_HZ, MIN_INTERVAL_MS, MIN_SAMPLE_RATE_HZ,
};

/// CLI options for the pulsescope TUI. Validated values keep the capture and
/// render layers free of range checks.
#[derive(Debug, Parser, Clone)]
#[command(name = "pulsescope", about = "Live audio waveform scope in the terminal", author, version)]
pub struct AppConfig {
    /// Capture length per cycle in seconds
    #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    pub fs: u32,

    /// Pause between cycles in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval: u64,

    /// Audio input device index (see --list-devices)
    #[arg(long, default_value_t = DEFAULT_DEVICE_INDEX)]
    pub device: usize,

    /// Print detected audio input devices and exit
    #[arg(long = "list-devices", default_value_t = false)]
    pub list_devices: bool,

    /// Enable debug file logging
    #[arg(long, env = "PULSESCOPE_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and the log env var)
    #[arg(long = "no-logs", env = "PULSESCOPE_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,
}
