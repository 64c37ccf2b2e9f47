//! Login against the remote service.
//!
//! The authentication protocol itself lives in the backend; the client
//! only exchanges credentials for an opaque bearer token and a profile.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::Serialize;

use super::client::{ApiClient, check_status};
use crate::session::SessionCredentials;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange email and password for session credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionCredentials> {
        let body = LoginBody { email, password };
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;
        let response = check_status(response).await?;

        response.json().await.context("Failed to parse login response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_response() {
        let json = r#"{"token":"abc123","user":{"name":"Ada","email":"ada@example.com"}}"#;
        let creds: SessionCredentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.token, "abc123");
        assert_eq!(creds.user.name, "Ada");
        assert_eq!(creds.user.email, "ada@example.com");
    }
}
