//! Input device enumeration and index-based resolution.

use super::NUM_CHANNELS;
use crate::logging::log_debug;
use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait};

/// Identity and capability snapshot for one enumerated input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub index: usize,
    pub name: String,
    pub max_input_channels: u16,
}

/// Enumerate input devices so the CLI can expose an index-based selector.
pub fn list_devices() -> Result<Vec<DeviceDescriptor>> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .context("failed to enumerate audio input devices")?;
    let mut descriptors = Vec::new();
    for (index, device) in devices.enumerate() {
        let name = device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string());
        descriptors.push(DeviceDescriptor {
            index,
            name,
            max_input_channels: max_input_channels(&device),
        });
    }
    Ok(descriptors)
}

/// Resolve a user-supplied device index against the enumerated list.
///
/// Fails before any stream or display resource exists, so a bad index aborts
/// the run during startup.
pub fn resolve_device(index: usize) -> Result<(cpal::Device, DeviceDescriptor)> {
    let host = cpal::default_host();
    let devices: Vec<cpal::Device> = host
        .input_devices()
        .context("failed to enumerate audio input devices")?
        .collect();
    let available = devices.len();
    validate_device_index(index, available)?;
    let device = devices
        .into_iter()
        .nth(index)
        .ok_or_else(|| anyhow!("invalid device id {index}: {available} input device(s) available"))?;
    let descriptor = DeviceDescriptor {
        index,
        name: device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string()),
        max_input_channels: max_input_channels(&device),
    };
    log_debug(&format!(
        "resolved input device [{index}] '{}' ({} max channels)",
        descriptor.name, descriptor.max_input_channels
    ));
    Ok((device, descriptor))
}

/// Capture is fixed at two channels; make that an up-front precondition
/// instead of an obscure stream-open failure.
pub fn ensure_channel_support(descriptor: &DeviceDescriptor) -> Result<()> {
    if descriptor.max_input_channels < NUM_CHANNELS {
        bail!(
            "device '{}' reports {} input channel(s); capture needs {NUM_CHANNELS}",
            descriptor.name,
            descriptor.max_input_channels
        );
    }
    Ok(())
}

pub(super) fn validate_device_index(index: usize, available: usize) -> Result<()> {
    if index >= available {
        bail!(
            "invalid device id {index}: {available} input device(s) available; \
             run with --list-devices to see valid ids"
        );
    }
    Ok(())
}

fn max_input_channels(device: &cpal::Device) -> u16 {
    // Prefer the full supported-config sweep; mono default configs are common
    // on devices that still expose stereo modes.
    match device.supported_input_configs() {
        Ok(configs) => configs.map(|cfg| cfg.channels()).max().unwrap_or(0),
        Err(_) => device
            .default_input_config()
            .map(|cfg| cfg.channels())
            .unwrap_or(0),
    }
}
