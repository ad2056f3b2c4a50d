//! Per-cycle peak normalization and level measurement.
//!
//! Each captured buffer is rescaled so its global peak maps to 1.0. An
//! all-zero buffer stays all-zero: dividing by a zero peak would fill the
//! plot with NaN, so silence renders as a flat line instead.

use crate::audio::CaptureBuffer;

/// dB floor reported for empty or silent signals.
const LEVEL_FLOOR_DB: f32 = -60.0;

/// A capture buffer rescaled to amplitudes in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWaveform {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
    peak: f32,
}

impl NormalizedWaveform {
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Global peak of the source buffer before rescaling; 0.0 means the
    /// capture was silent and the waveform was passed through unchanged.
    pub fn source_peak(&self) -> f32 {
        self.peak
    }

    pub fn source_peak_db(&self) -> f32 {
        amplitude_db(self.peak)
    }

    /// RMS level of the source buffer across all channels.
    pub fn source_rms_db(&self) -> f32 {
        let total: usize = self.channels.iter().map(Vec::len).sum();
        if total == 0 || self.peak <= 0.0 {
            return LEVEL_FLOOR_DB;
        }
        // Channels hold normalized samples; undo the rescale for the level.
        let energy: f32 = self
            .channels
            .iter()
            .flatten()
            .map(|s| {
                let raw = s * self.peak;
                raw * raw
            })
            .sum::<f32>()
            / total as f32;
        amplitude_db(energy.sqrt())
    }
}

/// Rescale a captured buffer to [-1, 1] and derive its time axis.
///
/// With a nonzero peak, at least one sample lands on exactly ±1. Silence is
/// passed through untouched.
pub fn normalize(buffer: CaptureBuffer) -> (NormalizedWaveform, Vec<f64>) {
    let sample_rate = buffer.sample_rate();
    let mut channels = buffer.into_channels();
    let peak = global_peak(&channels);
    if peak > 0.0 {
        for channel in &mut channels {
            for sample in channel.iter_mut() {
                *sample /= peak;
            }
        }
    }
    let axis = time_axis(
        channels.first().map(Vec::len).unwrap_or(0),
        sample_rate,
    );
    (
        NormalizedWaveform {
            channels,
            sample_rate,
            peak,
        },
        axis,
    )
}

/// Evenly spaced timestamps at 1/fs, one per sample.
pub fn time_axis(sample_count: usize, sample_rate: u32) -> Vec<f64> {
    let step = 1.0 / f64::from(sample_rate.max(1));
    (0..sample_count).map(|i| i as f64 * step).collect()
}

/// Largest absolute sample across all channels.
pub(crate) fn global_peak(channels: &[Vec<f32>]) -> f32 {
    channels
        .iter()
        .flatten()
        .fold(0.0_f32, |peak, sample| peak.max(sample.abs()))
}

fn amplitude_db(amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        return LEVEL_FLOOR_DB;
    }
    (20.0 * amplitude.log10()).max(LEVEL_FLOOR_DB)
}
