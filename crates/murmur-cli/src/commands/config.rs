//! Show or change settings non-interactively.

use anyhow::Result;
use console::style;
use murmur_core::Settings;

use crate::args::ConfigArgs;
use crate::ui;

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(url) = args.api_url {
        settings.api_base_url = url;
        changed = true;
    }
    if let Some(language) = args.language {
        settings.language = (!language.is_empty()).then_some(language);
        changed = true;
    }
    if let Some(device) = args.device {
        settings.microphone_device = (!device.is_empty()).then_some(device);
        changed = true;
    }
    if let Some(target) = args.target_lang {
        settings.target_lang = target;
        changed = true;
    }

    if changed {
        settings.save()?;
        ui::success("Settings saved");
    }

    let unset = |value: Option<&str>, fallback: &str| -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| style(fallback).dim().to_string())
    };

    println!("api-url      {}", settings.api_base_url());
    println!(
        "language     {}",
        unset(settings.language.as_deref(), "(autodetect)")
    );
    println!(
        "device       {}",
        unset(settings.microphone_device.as_deref(), "(system default)")
    );
    println!("target-lang  {}", settings.target_lang);

    Ok(())
}
