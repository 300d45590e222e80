use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::auth::CurrentUser;

#[derive(Debug, Error)]
pub enum PortalError {
    /// The API refused the request and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("session is no longer valid")]
    Unauthorized,

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// HTTP client for the JSON API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("SimpleERP-CustomerPortal")
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, PortalError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginPayload { username, password })
            .send()
            .await?;

        if response.status().is_success() {
            let body: TokenBody = response.json().await?;
            return Ok(body.token);
        }
        Err(rejection(response, "Login failed.").await)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), PortalError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&RegisterPayload {
                username,
                email,
                password,
            })
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(rejection(response, "Registration failed.").await)
    }

    /// Resolve the identity behind `token`; an expired or forged token yields `Unauthorized`.
    pub async fn current_user(&self, token: &str) -> Result<CurrentUser, PortalError> {
        let response = self
            .http
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(PortalError::Unauthorized),
            status => Err(PortalError::UnexpectedResponse(format!(
                "/api/auth/me returned {status}"
            ))),
        }
    }
}

async fn rejection(response: reqwest::Response, fallback: &str) -> PortalError {
    let status = response.status();
    if status.is_server_error() {
        return PortalError::UnexpectedResponse(format!("API returned {status}"));
    }
    let message = response
        .json::<MessageBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| fallback.to_string());
    PortalError::Rejected(message)
}
