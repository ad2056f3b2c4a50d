use super::defaults::{
    MAX_DURATION_SECS, MAX_INTERVAL_MS, MAX_SAMPLE_RATE_HZ, MIN_INTERVAL_MS, MIN_SAMPLE_RATE_HZ,
};
use super::AppConfig;
use anyhow::{bail, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values before any audio or terminal resource is acquired.
    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            bail!(
                "--duration must be a positive number of seconds, got {}",
                self.duration
            );
        }
        if self.duration > MAX_DURATION_SECS {
            bail!(
                "--duration must be at most {MAX_DURATION_SECS} seconds, got {}",
                self.duration
            );
        }
        if !(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ).contains(&self.fs) {
            bail!(
                "--fs must be between {MIN_SAMPLE_RATE_HZ} and {MAX_SAMPLE_RATE_HZ} Hz, got {}",
                self.fs
            );
        }
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval) {
            bail!(
                "--interval must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS} ms, got {}",
                self.interval
            );
        }
        Ok(())
    }
}
