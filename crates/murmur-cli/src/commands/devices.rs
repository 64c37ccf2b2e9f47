//! List audio input devices.

use anyhow::Result;
use console::style;
use murmur_core::list_input_devices;

pub fn run() -> Result<()> {
    for device in list_input_devices()? {
        if device.is_default {
            println!("{} {}", device.name, style("(default)").dim());
        } else {
            println!("{}", device.name);
        }
    }
    Ok(())
}
