//! Shared HTTP client and request plumbing.

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;

/// Upload timeout in seconds. Transcription of a long recording can take
/// a while on the server side, so this is deliberately generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Explicit context object for talking to the remote service.
///
/// Holds the validated base URL, the optional bearer token, and one
/// shared connection pool. Construct it where needed and pass it down;
/// there is no ambient global client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given service base URL.
    ///
    /// The token, when present, is attached to every request as a
    /// bearer `Authorization` header.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }
}

/// Turn a non-success response into an error carrying status and body.
pub(super) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("API error ({status}): {error_text}");
    }
    Ok(response)
}

/// Validate and normalize the service base URL.
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        anyhow::bail!(
            "Service URL not configured.\n\
             Set with: murmur config --api-url http://localhost:5000"
        );
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!(
            "Invalid service URL: must start with http:// or https://\n\
             Got: {trimmed}\n\
             Example: murmur config --api-url http://localhost:5000"
        );
    }

    // Ensure there's a host after the scheme
    let after_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        anyhow::bail!(
            "Invalid service URL: missing host\n\
             Got: {trimmed}\n\
             Example: murmur config --api-url http://localhost:5000"
        );
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_valid_urls() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            normalize_base_url("  https://stt.example.com  ").unwrap(),
            "https://stt.example.com"
        );
    }

    #[test]
    fn rejects_missing_scheme_or_host() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("localhost:5000").is_err());
        assert!(normalize_base_url("http://").is_err());
        assert!(normalize_base_url("https:///path").is_err());
    }

    #[test]
    fn client_records_token_presence() {
        let anon = ApiClient::new("http://localhost:5000", None).unwrap();
        assert!(!anon.has_token());

        let auth = ApiClient::new("http://localhost:5000", Some("tok".into())).unwrap();
        assert!(auth.has_token());
        assert_eq!(auth.base_url(), "http://localhost:5000");
    }
}
