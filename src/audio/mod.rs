//! Audio device resolution and blocking multi-channel capture.
//!
//! Capture runs via CPAL: the device callback converts incoming samples to
//! f32 and hands them over a bounded channel; the caller blocks until one
//! full capture window has arrived.

/// Channel count for every capture, regardless of what the device natively
/// prefers. Two channels keep stereo time-of-flight traces comparable.
pub const NUM_CHANNELS: u16 = 2;

mod capture;
mod device;
#[cfg(test)]
mod tests;

pub use capture::{CaptureBuffer, Recorder};
pub use device::{ensure_channel_support, list_devices, resolve_device, DeviceDescriptor};
