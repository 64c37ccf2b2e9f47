//! Translate text through the service.

use anyhow::Result;
use murmur_core::Settings;

use crate::app;

pub async fn run(text: String, to: Option<String>) -> Result<()> {
    let settings = Settings::load();
    let target = to.unwrap_or_else(|| settings.target_lang.clone());
    let client = app::api_client(&settings)?;

    let translation = client.translate(&text, &target).await?;
    println!("{translation}");
    Ok(())
}
