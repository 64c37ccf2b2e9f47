//! Persisted session credentials.
//!
//! An opaque bearer token plus the user profile, with no client-enforced
//! expiry: the stored values stay valid until an explicit logout deletes
//! them. The store is an explicit object with a load/save/clear
//! lifecycle; nothing here is ambient global state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::settings::config_dir;

/// Profile of the logged-in user, as the service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Bearer token and profile for one logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub token: String,
    pub user: UserProfile,
}

/// On-disk store for session credentials.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at its default location under the config dir.
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: config_dir()?.join("session.json"),
        })
    }

    /// Open a store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load stored credentials, or None when nobody is logged in.
    ///
    /// A corrupt file is treated as absent (with a warning) rather than
    /// an error: the remedy either way is to log in again.
    pub fn load(&self) -> Option<SessionCredentials> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                crate::warn!("Ignoring unreadable session file: {e}");
                None
            }
        }
    }

    /// Persist credentials after a successful login.
    pub fn save(&self, credentials: &SessionCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let json = serde_json::to_string_pretty(credentials)
            .context("Failed to serialize session credentials")?;
        fs::write(&self.path, json).context("Failed to write session file")?;
        Ok(())
    }

    /// Log out: delete the stored values. The only invalidation there is.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }

    /// Resolve the bearer token: the `MURMUR_TOKEN` environment variable
    /// takes precedence over the stored session.
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("MURMUR_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.load().map(|credentials| credentials.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> SessionCredentials {
        SessionCredentials {
            token: "tok-1".into(),
            user: UserProfile {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
        }
    }

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));

        store.save(&credentials()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "tok-1");
        assert_eq!(loaded.user.email, "ada@example.com");

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = SessionStore::at(path);
        assert!(store.load().is_none());
    }
}
