//! Interactive first-time setup.
//!
//! Walks through the service URL, microphone, and language, then offers
//! to log in.

use anyhow::Result;
use murmur_core::{Settings, list_input_devices};

use super::auth;
use crate::ui;

pub async fn run() -> Result<()> {
    ui::header("murmur setup");
    let mut settings = Settings::load();

    // Step 1: where the service lives
    let api_url = ui::input("Service URL", Some(&settings.api_base_url))?;
    if !api_url.trim().is_empty() {
        settings.api_base_url = api_url.trim().to_string();
    }

    // Step 2: which microphone
    match list_input_devices() {
        Ok(devices) => {
            let mut items = vec!["System default".to_string()];
            items.extend(devices.iter().map(|d| {
                if d.is_default {
                    format!("{} (default)", d.name)
                } else {
                    d.name.clone()
                }
            }));

            let current = settings
                .microphone_device
                .as_ref()
                .and_then(|name| devices.iter().position(|d| &d.name == name))
                .map(|idx| idx + 1)
                .unwrap_or(0);

            let choice = ui::select("Which microphone?", &items, Some(current))?;
            settings.microphone_device = if choice == 0 {
                None
            } else {
                Some(devices[choice - 1].name.clone())
            };
        }
        Err(e) => ui::info(&format!("Skipping microphone selection: {e}")),
    }

    // Step 3: transcription language
    let language = ui::input(
        "Transcription language (empty = autodetect)",
        settings.language.as_deref(),
    )?;
    settings.language = if language.trim().is_empty() {
        None
    } else {
        Some(language.trim().to_string())
    };

    settings.save()?;

    // Step 4: optional login
    if ui::confirm("Log in now?", false)? {
        auth::login_flow(&settings).await?;
    }

    println!();
    ui::success("Configuration saved! Run 'murmur' to record and transcribe.");
    Ok(())
}
