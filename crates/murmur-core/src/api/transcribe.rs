//! Audio transcription upload.

use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::client::{ApiClient, check_status};

#[derive(Deserialize)]
struct TranscribeResponse {
    transcript: String,
}

impl ApiClient {
    /// Upload one audio payload for transcription and return the text.
    ///
    /// The payload is sent as a multipart form with the file under the
    /// `audio` field. An optional language hint is included when
    /// configured. The audio is not cached: a failed upload means the
    /// payload is gone and the caller reports the error.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
        mime_type: &str,
        language: Option<&str>,
    ) -> Result<String> {
        crate::verbose!(
            "Uploading {:.1} KB as {filename} ({mime_type})",
            audio.len() as f64 / 1024.0
        );

        let mut form = Form::new().part(
            "audio",
            Part::bytes(audio)
                .file_name(filename.to_string())
                .mime_str(mime_type)
                .context("Invalid MIME type for audio upload")?,
        );

        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self
            .request(Method::POST, "/api/transcribe")
            .multipart(form)
            .send()
            .await
            .context("Failed to send transcription request")?;
        let response = check_status(response).await?;

        let resp: TranscribeResponse = response
            .json()
            .await
            .context("Failed to parse transcription response")?;
        Ok(resp.transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcript_field() {
        let resp: TranscribeResponse =
            serde_json::from_str(r#"{"transcript":"hello world"}"#).unwrap();
        assert_eq!(resp.transcript, "hello world");
    }

    #[test]
    fn ignores_extra_response_fields() {
        let resp: TranscribeResponse =
            serde_json::from_str(r#"{"transcript":"hi","durationMs":1200}"#).unwrap();
        assert_eq!(resp.transcript, "hi");
    }
}
