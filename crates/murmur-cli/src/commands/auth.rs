//! Session lifecycle: login, logout, whoami.

use anyhow::Result;
use murmur_core::{ApiClient, SessionStore, Settings};

use crate::ui;

pub async fn login() -> Result<()> {
    let settings = Settings::load();
    login_flow(&settings).await
}

/// Prompt for credentials, exchange them for a session, persist it.
///
/// Also used by the setup wizard.
pub(crate) async fn login_flow(settings: &Settings) -> Result<()> {
    // Login itself is unauthenticated
    let client = ApiClient::new(&settings.api_base_url(), None)?;

    let email = ui::input("Email", None)?;
    let password = ui::password("Password")?;

    let credentials = client.login(&email, &password).await?;
    let store = SessionStore::open()?;
    store.save(&credentials)?;

    ui::success(&format!("Logged in as {}", credentials.user.name));
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::open()?;
    store.clear()?;
    ui::success("Logged out");
    Ok(())
}

pub fn whoami() -> Result<()> {
    let store = SessionStore::open()?;
    match store.load() {
        Some(credentials) => {
            println!("{} <{}>", credentials.user.name, credentials.user.email);
        }
        None => ui::info("Not logged in. Run 'murmur login' first."),
    }
    Ok(())
}
