//! pulsescope entrypoint: capture short audio snippets from a selected input
//! device and plot them live in the terminal until interrupted.
//!
//! Example: observe 0.1 s acoustic pulses at 44.1 kHz, redrawn every 300 ms,
//! from device 1:
//!
//! ```text
//! pulsescope --duration 0.1 --fs 44100 --interval 300 --device 1
//! ```
//!
//! Run with `--list-devices` to see which device ids are available.

use anyhow::Result;
use pulsescope::audio::list_devices;
use pulsescope::config::AppConfig;
use pulsescope::terminal_restore::install_terminal_panic_hook;
use pulsescope::{init_logging, run};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    install_terminal_panic_hook();

    if config.list_devices {
        let devices = list_devices()?;
        if devices.is_empty() {
            println!("No audio input devices detected.");
        } else {
            println!("Available audio input devices:");
            for device in &devices {
                println!(
                    "  [{}] {} ({} ch)",
                    device.index, device.name, device.max_input_channels
                );
            }
        }
        return Ok(());
    }

    run::run(&config)
}
