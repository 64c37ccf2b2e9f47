//! Transcript translation.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, check_status};

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    #[serde(rename = "targetLang")]
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

impl ApiClient {
    /// Translate text into the target language.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let body = TranslateBody { text, target_lang };
        let response = self
            .request(Method::POST, "/api/translate")
            .json(&body)
            .send()
            .await
            .context("Failed to send translation request")?;
        let response = check_status(response).await?;

        let resp: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;
        Ok(resp.translation)
    }
}
