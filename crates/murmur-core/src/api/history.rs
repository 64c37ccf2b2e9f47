//! Transcript history: server-owned records, cached read-only for display.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::{ApiClient, check_status};

/// One saved transcript, as the server returns it.
///
/// The server owns these records; the client never mutates a cached copy
/// except to drop it after a confirmed delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Export formats the history download endpoint offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Txt,
    Pdf,
}

impl HistoryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryFormat::Txt => "txt",
            HistoryFormat::Pdf => "pdf",
        }
    }

    /// Default file name for a downloaded export.
    pub fn default_filename(&self) -> &'static str {
        match self {
            HistoryFormat::Txt => "history.txt",
            HistoryFormat::Pdf => "history.pdf",
        }
    }
}

impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HistoryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(HistoryFormat::Txt),
            "pdf" => Ok(HistoryFormat::Pdf),
            _ => Err(format!("Unknown format: {s}. Available: txt, pdf")),
        }
    }
}

impl ApiClient {
    /// Fetch all saved transcripts, in the order the server returns them.
    pub async fn history(&self) -> Result<Vec<TranscriptRecord>> {
        let response = self
            .request(Method::GET, "/api/history")
            .send()
            .await
            .context("Failed to fetch history")?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .context("Failed to parse history response")
    }

    /// Save a transcript to the history.
    pub async fn save_transcript(&self, text: &str) -> Result<()> {
        let response = self
            .request(Method::POST, "/api/history")
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .context("Failed to save transcript")?;
        check_status(response).await?;
        Ok(())
    }

    /// Delete one saved transcript. The caller drops its cached copy only
    /// after this returns success.
    pub async fn delete_transcript(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/history/{id}"))
            .send()
            .await
            .context("Failed to delete transcript")?;
        check_status(response).await?;
        Ok(())
    }

    /// Delete the entire history.
    pub async fn clear_history(&self) -> Result<()> {
        let response = self
            .request(Method::DELETE, "/api/history")
            .send()
            .await
            .context("Failed to clear history")?;
        check_status(response).await?;
        Ok(())
    }

    /// Download the history as an exported document.
    pub async fn download_history(&self, format: HistoryFormat) -> Result<Vec<u8>> {
        let path = format!("/api/history/download?format={format}");
        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .context("Failed to download history")?;
        let response = check_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read history download")?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_record_fields() {
        let json = r#"[
            {"_id":"66f1a","text":"first note","createdAt":"2026-01-12T09:30:00Z"},
            {"_id":"66f1b","text":"second note","createdAt":"2026-01-12T10:00:00Z"}
        ]"#;
        let records: Vec<TranscriptRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "66f1a");
        assert_eq!(records[0].text, "first note");
        assert!(records[0].created_at < records[1].created_at);
    }

    #[test]
    fn format_parses_and_displays() {
        assert_eq!("txt".parse::<HistoryFormat>().unwrap(), HistoryFormat::Txt);
        assert_eq!("PDF".parse::<HistoryFormat>().unwrap(), HistoryFormat::Pdf);
        assert!("csv".parse::<HistoryFormat>().is_err());
        assert_eq!(HistoryFormat::Txt.to_string(), "txt");
        assert_eq!(HistoryFormat::Pdf.default_filename(), "history.pdf");
    }
}
