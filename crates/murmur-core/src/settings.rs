//! Persisted client settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Client settings, stored as JSON under the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the transcription service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Language hint sent with transcription uploads (None = autodetect)
    #[serde(default)]
    pub language: Option<String>,

    /// Selected microphone device name (None = system default)
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Default target language for translations
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            language: None,
            microphone_device: None,
            target_lang: default_target_lang(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        match settings_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                crate::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to the config directory.
    pub fn save(&self) -> Result<()> {
        let path = settings_path()?;
        self.save_to(&path)
    }

    /// The service base URL, with the `MURMUR_API_URL` environment
    /// variable taking precedence over the stored value.
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = std::env::var("MURMUR_API_URL")
            && !url.is_empty()
        {
            return url;
        }
        self.api_base_url.clone()
    }

    fn load_from(path: &PathBuf) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                crate::warn!("Ignoring unreadable settings file: {e}");
                Self::default()
            }
        }
    }

    fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).context("Failed to write settings file")?;
        Ok(())
    }
}

/// Config directory for murmur files.
///
/// `MURMUR_CONFIG_DIR` overrides the platform default.
pub(crate) fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MURMUR_CONFIG_DIR")
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("murmur"))
}

fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings.api_base_url, "http://localhost:5000");
        assert_eq!(settings.target_lang, "en");
        assert!(settings.language.is_none());
        assert!(settings.microphone_device.is_none());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.api_base_url = "https://stt.example.com".into();
        settings.language = Some("de".into());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.api_base_url, "https://stt.example.com");
        assert_eq!(loaded.language.as_deref(), Some("de"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"language":"fr"}"#).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.language.as_deref(), Some("fr"));
        assert_eq!(loaded.api_base_url, "http://localhost:5000");
    }
}
