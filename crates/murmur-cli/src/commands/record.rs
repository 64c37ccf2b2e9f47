//! Record from the microphone and transcribe.

use anyhow::{Context, Result};
use console::style;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use murmur_core::{CpalBackend, Recorder, Settings};
use std::io::Write;
use std::time::Duration;

use crate::args::RecordArgs;
use crate::{app, ui};

/// Word delay for the transcript display
const TYPEWRITER_DELAY_MS: u64 = 30;

pub async fn run(args: RecordArgs) -> Result<()> {
    let settings = Settings::load();
    let device = args.device.or_else(|| settings.microphone_device.clone());
    let language = args.language.or_else(|| settings.language.clone());
    let client = app::api_client(&settings)?;

    let mut recorder = Recorder::new();
    if let Err(e) = recorder.start(Box::new(CpalBackend::new(device))) {
        // Terminal for this attempt: no retry, back at idle.
        ui::error(&format!("Cannot access microphone: {e}"));
        std::process::exit(1);
    }

    println!(
        "{} Recording — press Enter to stop",
        style("●").red().bold()
    );
    show_elapsed_until_enter(&recorder)?;

    let recording = recorder.stop()?;
    println!(
        "{} Recorded {}",
        style("●").dim(),
        app::format_elapsed(recording.duration_secs)
    );

    if let Some(path) = &args.output {
        std::fs::write(path, &recording.wav)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::info(&format!("Recording saved to {}", path.display()));
    }

    println!("Transcribing...");
    let text = match client
        .transcribe(recording.wav, "recording.wav", "audio/wav", language.as_deref())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            // The captured audio is discarded with the error; there is no
            // retry cache.
            ui::error(&format!("Transcription failed: {e:#}"));
            std::process::exit(1);
        }
    };

    app::typewriter(&text, TYPEWRITER_DELAY_MS);

    if args.save {
        client.save_transcript(&text).await?;
        ui::success("Saved to history");
    }

    Ok(())
}

/// Redraw the elapsed counter until the user presses Enter.
fn show_elapsed_until_enter(recorder: &Recorder) -> Result<()> {
    enable_raw_mode()?;

    let result = (|| -> Result<()> {
        loop {
            if event::poll(Duration::from_millis(200))?
                && let Event::Key(key) = event::read()?
                && key.code == KeyCode::Enter
            {
                break;
            }
            print!(
                "\r{} {}  ",
                style("●").red().bold(),
                app::format_elapsed(recorder.elapsed_seconds())
            );
            std::io::stdout().flush()?;
        }
        Ok(())
    })();

    disable_raw_mode()?;
    println!();
    result
}
