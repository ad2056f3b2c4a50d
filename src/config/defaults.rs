//! Default values and validation bounds for the CLI surface.

/// Capture window per cycle, in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Capture sample rate, in Hz.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;

/// Pause between cycles, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Input device index. Index 2 is where external sound cards commonly land
/// after the default input and monitor devices.
pub const DEFAULT_DEVICE_INDEX: usize = 2;

/// Longest useful single trace; anything beyond this makes the scope unusable
/// as a live display.
pub const MAX_DURATION_SECS: f64 = 60.0;

pub const MIN_SAMPLE_RATE_HZ: u32 = 8_000;
pub const MAX_SAMPLE_RATE_HZ: u32 = 192_000;

pub const MIN_INTERVAL_MS: u64 = 1;
pub const MAX_INTERVAL_MS: u64 = 60_000;
