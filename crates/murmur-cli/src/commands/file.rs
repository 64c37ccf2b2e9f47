//! Transcribe an existing audio file.
//!
//! The file is uploaded as-is; decoding is the service's job.

use anyhow::{Context, Result};
use murmur_core::Settings;
use std::path::Path;

use crate::args::FileArgs;
use crate::{app, ui};

pub async fn run(args: FileArgs) -> Result<()> {
    let mime_type = mime_for(&args.path)?;
    let audio = std::fs::read(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let filename = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio")
        .to_string();

    let settings = Settings::load();
    let language = args.language.or_else(|| settings.language.clone());
    let client = app::api_client(&settings)?;

    println!("Transcribing {}...", args.path.display());
    let text = client
        .transcribe(audio, &filename, mime_type, language.as_deref())
        .await?;

    app::typewriter(&text, 30);

    if args.save {
        client.save_transcript(&text).await?;
        ui::success("Saved to history");
    }

    Ok(())
}

/// MIME type for an audio file, by extension.
fn mime_for(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("wav") => Ok("audio/wav"),
        Some("mp3") => Ok("audio/mpeg"),
        Some("m4a") => Ok("audio/mp4"),
        Some("ogg") => Ok("audio/ogg"),
        Some("flac") => Ok("audio/flac"),
        Some("webm") => Ok("audio/webm"),
        Some("aac") => Ok("audio/aac"),
        Some("opus") => Ok("audio/opus"),
        Some(ext) => anyhow::bail!(
            "Unsupported audio format: .{ext}\n\
             Supported: wav, mp3, m4a, ogg, flac, webm, aac, opus"
        ),
        None => anyhow::bail!("File has no extension. Please provide an audio file."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(mime_for(&PathBuf::from("a.wav")).unwrap(), "audio/wav");
        assert_eq!(mime_for(&PathBuf::from("a.MP3")).unwrap(), "audio/mpeg");
        assert_eq!(mime_for(&PathBuf::from("a.webm")).unwrap(), "audio/webm");
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert!(mime_for(&PathBuf::from("a.txt")).is_err());
        assert!(mime_for(&PathBuf::from("noext")).is_err());
    }
}
