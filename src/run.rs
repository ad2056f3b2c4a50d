//! Lifecycle controller for the capture-normalize-render loop.
//!
//! STARTING resolves the device and creates the surface; RUNNING repeats
//! capture -> normalize -> render -> pause; an interrupt observed during the
//! pause moves through STOPPING to STOPPED, where the surface is released
//! exactly once. Capture and render errors abort the loop and still release
//! the surface through its drop guard.

use crate::audio::{ensure_channel_support, resolve_device, CaptureBuffer, Recorder};
use crate::config::AppConfig;
use crate::logging::log_debug;
use crate::scope::{ScopeFrame, ScopeSurface};
use crate::waveform::normalize;
use anyhow::Result;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// What the sink's pause observed: keep cycling, or begin orderly shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleControl {
    Continue,
    Interrupt,
}

/// Blocking producer of one capture window per call.
pub trait SampleSource {
    fn capture(&mut self) -> Result<CaptureBuffer>;
}

/// Owner of the persistent display surface.
pub trait ScopeSink {
    fn render(&mut self, frame: &ScopeFrame) -> Result<()>;
    fn pause(&mut self, interval: Duration) -> Result<CycleControl>;
    fn finish(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
}

/// Drive the cycle until the sink reports an interrupt.
///
/// Interrupts are only observed between work units; a capture in flight
/// always completes before shutdown begins.
pub fn drive<S: SampleSource, K: ScopeSink>(
    source: &mut S,
    sink: &mut K,
    interval: Duration,
) -> Result<RunSummary> {
    let mut cycles: u64 = 0;
    let mut phase = Phase::Starting;
    loop {
        phase = match phase {
            Phase::Starting => Phase::Running,
            Phase::Running => {
                let buffer = source.capture()?;
                let (waveform, time_axis) = normalize(buffer);
                let frame = ScopeFrame::new(&waveform, &time_axis, cycles + 1);
                sink.render(&frame)?;
                cycles += 1;
                match sink.pause(interval)? {
                    CycleControl::Continue => Phase::Running,
                    CycleControl::Interrupt => Phase::Stopping,
                }
            }
            Phase::Stopping => {
                log_debug(&format!(
                    "interrupt received after {cycles} cycle(s); stopping"
                ));
                Phase::Stopped
            }
            Phase::Stopped => return Ok(RunSummary { cycles }),
        };
    }
}

/// Hardware-backed source: one fresh blocking capture per cycle.
struct RecorderSource {
    recorder: Recorder,
    duration_secs: f64,
    sample_rate: u32,
}

impl SampleSource for RecorderSource {
    fn capture(&mut self) -> Result<CaptureBuffer> {
        self.recorder.capture(self.duration_secs, self.sample_rate)
    }
}

/// Resolve the device, own the surface for the whole run, and loop until
/// interrupted. A resolution failure returns before any surface exists.
pub fn run(config: &AppConfig) -> Result<()> {
    let (device, descriptor) = resolve_device(config.device)?;
    ensure_channel_support(&descriptor)?;
    println!("Selected device: {}", descriptor.name);
    log_debug(&format!(
        "starting scope: duration={}s fs={}Hz interval={}ms device=[{}] '{}'",
        config.duration, config.fs, config.interval, descriptor.index, descriptor.name
    ));

    let mut source = RecorderSource {
        recorder: Recorder::new(device, descriptor.clone()),
        duration_secs: config.duration,
        sample_rate: config.fs,
    };
    let mut surface = ScopeSurface::new(&descriptor.name, config.fs)?;

    match drive(
        &mut source,
        &mut surface,
        Duration::from_millis(config.interval),
    ) {
        Ok(summary) => {
            surface.finish()?;
            println!(
                "Interrupted after {} cycle(s). Exiting gracefully.",
                summary.cycles
            );
            Ok(())
        }
        // The surface's guard restores the terminal when it drops here.
        Err(err) => Err(err),
    }
}
