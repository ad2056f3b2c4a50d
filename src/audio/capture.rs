//! Blocking fixed-duration capture.
//!
//! One call produces one fresh `CaptureBuffer`: the stream is opened, exactly
//! `round(duration * fs)` frames are collected, and the stream is torn down
//! before the buffer is returned. Nothing is reused between calls.

use super::device::DeviceDescriptor;
use super::NUM_CHANNELS;
use crate::logging::log_debug;
use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig};
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pending chunks allowed between the device callback and the collector. The
/// collector only appends to a Vec, so it drains far faster than any device
/// delivers; a full channel means the collector has stalled.
const CHUNK_CHANNEL_CAPACITY: usize = 256;

/// Extra time past the nominal window before a capture counts as stalled.
const CAPTURE_GRACE: Duration = Duration::from_secs(5);

/// Longest single wait on the chunk channel, so the stall deadline is checked
/// at a reasonable cadence.
const COLLECT_TICK: Duration = Duration::from_millis(250);

/// One cycle's worth of multi-channel samples, owned by that cycle alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl CaptureBuffer {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

/// Number of frames a capture window covers, rounded to the nearest frame.
pub(crate) fn frames_for(duration_secs: f64, sample_rate: u32) -> usize {
    (duration_secs * f64::from(sample_rate)).round() as usize
}

/// Split an interleaved stream into per-channel sample vectors. A trailing
/// partial frame is dropped.
pub(crate) fn deinterleave(interleaved: &[f32], channel_count: usize) -> Vec<Vec<f32>> {
    let frames = interleaved.len() / channel_count.max(1);
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, sample) in channels.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }
    channels
}

/// Audio input device wrapper performing blocking two-channel captures.
pub struct Recorder {
    device: cpal::Device,
    descriptor: DeviceDescriptor,
}

impl Recorder {
    pub fn new(device: cpal::Device, descriptor: DeviceDescriptor) -> Self {
        Self { device, descriptor }
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Capture `duration_secs` of audio at `sample_rate` on two channels.
    ///
    /// Blocks until the full window has arrived; returns an error rather than
    /// a short or discontinuous buffer. No gain conditioning is applied.
    pub fn capture(&self, duration_secs: f64, sample_rate: u32) -> Result<CaptureBuffer> {
        let frames = frames_for(duration_secs, sample_rate);
        if frames == 0 {
            bail!("capture window of {duration_secs}s at {sample_rate}Hz holds no samples");
        }
        let channel_count = usize::from(NUM_CHANNELS);
        let total_samples = frames * channel_count;

        let format = self
            .device
            .default_input_config()
            .context("failed to query device input format")?
            .sample_format();
        let stream_config = StreamConfig {
            channels: NUM_CHANNELS,
            sample_rate: SampleRate(sample_rate),
            buffer_size: BufferSize::Default,
        };

        // cpal delivers samples on a callback thread; a bounded channel moves
        // them to this thread, which blocks until the window is complete.
        let (sender, receiver) = bounded::<Vec<f32>>(CHUNK_CHANNEL_CAPACITY);
        let dropped = Arc::new(AtomicUsize::new(0));
        let err_fn = |err| log_debug(&format!("audio stream error: {err}"));

        // Convert every supported sample type to f32 in the callback so the
        // collector stays format-agnostic.
        let stream = match format {
            SampleFormat::F32 => {
                let sender = sender.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _| {
                        let chunk: Vec<f32> = data.to_vec();
                        if sender.try_send(chunk).is_err() {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let sender = sender.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _| {
                        let chunk: Vec<f32> = data
                            .iter()
                            .map(|&sample| f32::from(sample) / 32_768.0_f32)
                            .collect();
                        if sender.try_send(chunk).is_err() {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::U16 => {
                let sender = sender.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &stream_config,
                    move |data: &[u16], _| {
                        let chunk: Vec<f32> = data
                            .iter()
                            .map(|&sample| (f32::from(sample) - 32_768.0_f32) / 32_768.0_f32)
                            .collect();
                        if sender.try_send(chunk).is_err() {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {other:?}")),
        };
        // The callback owns its clone; dropping ours lets the receiver see a
        // disconnect if the stream dies.
        drop(sender);

        stream
            .play()
            .with_context(|| format!("failed to start capture on '{}'", self.descriptor.name))?;

        let deadline = Instant::now() + Duration::from_secs_f64(duration_secs) + CAPTURE_GRACE;
        let mut interleaved: Vec<f32> = Vec::with_capacity(total_samples);
        while interleaved.len() < total_samples {
            let now = Instant::now();
            if now >= deadline {
                let _ = stream.pause();
                bail!(
                    "capture stalled on '{}': {} of {} samples after the window elapsed",
                    self.descriptor.name,
                    interleaved.len(),
                    total_samples
                );
            }
            let wait = COLLECT_TICK.min(deadline - now);
            match receiver.recv_timeout(wait) {
                Ok(chunk) => interleaved.extend(chunk),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    bail!(
                        "audio stream on '{}' disconnected mid-capture",
                        self.descriptor.name
                    );
                }
            }
        }

        if let Err(err) = stream.pause() {
            log_debug(&format!("failed to pause capture stream: {err}"));
        }
        drop(stream);

        // A full chunk channel means samples were lost and the trace would be
        // discontinuous; a misleading plot is worse than no plot.
        let lost = dropped.load(Ordering::Relaxed);
        if lost > 0 {
            bail!(
                "capture on '{}' lost {lost} chunk(s); buffer would be discontinuous",
                self.descriptor.name
            );
        }

        interleaved.truncate(total_samples);
        Ok(CaptureBuffer::new(
            deinterleave(&interleaved, channel_count),
            sample_rate,
        ))
    }
}
