//! Shared command plumbing: client construction and terminal output.

use anyhow::Result;
use murmur_core::{ApiClient, SessionStore, Settings};
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Build an API client from the stored settings and session.
///
/// The client works unauthenticated too; endpoints that need a login
/// reject the request server-side and the error is surfaced as-is.
pub fn api_client(settings: &Settings) -> Result<ApiClient> {
    let store = SessionStore::open()?;
    ApiClient::new(&settings.api_base_url(), store.token())
}

/// Print text with a typewriter effect, one word at a time.
pub fn typewriter(text: &str, delay_ms: u64) {
    let mut first = true;
    for word in text.split_whitespace() {
        if !first {
            print!(" ");
        }
        print!("{word}");
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(delay_ms));
        first = false;
    }
    println!();
}

/// Format whole seconds as MM:SS for the recording display.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(3600), "60:00");
    }
}
