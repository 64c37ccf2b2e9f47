//! Saved transcript history.

use anyhow::{Context, Result};
use console::style;
use murmur_core::{HistoryFormat, Settings};
use std::path::PathBuf;

use crate::args::HistoryCommand;
use crate::{app, ui};

pub async fn run(command: HistoryCommand) -> Result<()> {
    let settings = Settings::load();
    let client = app::api_client(&settings)?;

    match command {
        HistoryCommand::List => {
            let records = client.history().await?;
            if records.is_empty() {
                ui::info("No saved transcripts.");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {}",
                    style(record.created_at.format("%Y-%m-%d %H:%M").to_string()).dim(),
                    style(&record.id).dim()
                );
                println!("  {}", record.text);
                println!();
            }
        }

        HistoryCommand::Save { text } => {
            client.save_transcript(&text).await?;
            ui::success("Saved to history");
        }

        HistoryCommand::Delete { id } => {
            client.delete_transcript(&id).await?;
            ui::success("Deleted");
        }

        HistoryCommand::Clear { yes } => {
            if !yes && !ui::confirm("Delete the entire history?", false)? {
                ui::info("Cancelled");
                return Ok(());
            }
            client.clear_history().await?;
            ui::success("History cleared");
        }

        HistoryCommand::Download { format, output } => {
            let format: HistoryFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let bytes = client.download_history(format).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(format.default_filename()));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::success(&format!(
                "Wrote {} ({:.1} KB)",
                path.display(),
                bytes.len() as f64 / 1024.0
            ));
        }
    }

    Ok(())
}
