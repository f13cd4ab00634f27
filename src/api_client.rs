//! Client side of the language switch.
//!
//! [`LanguageApi`] is the one capability the switcher needs from a backend.
//! [`HttpApiClient`] implements it over JSON/HTTP and checks every redirect
//! it hands back before anything navigates to it.

use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Path of the backend endpoint that performs a language switch.
pub const SWITCH_LANGUAGE_PATH: &str = "/api/switch-language";

#[derive(Debug, Serialize, Deserialize)]
pub struct SwitchLanguageRequest {
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchLanguageResponse {
    pub redirect_url: String,
}

/// Why a language switch did not produce a redirect.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Language switch request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Language switch API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse language switch response: {0}")]
    Decode(String),

    #[error("Refusing to navigate to redirect URL '{0}'")]
    InvalidRedirect(String),

    #[error("A language switch is already in progress")]
    InFlight,
}

impl SwitchError {
    /// Server errors and transport failures may succeed on a second try.
    pub fn is_retryable(&self) -> bool {
        match self {
            SwitchError::Transport(_) => true,
            SwitchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The backend capability the switcher delegates to.
#[async_trait]
pub trait LanguageApi: Send + Sync {
    /// Ask the backend to switch to `code` and return the URL to load next.
    async fn switch_language(&self, code: &str) -> Result<String, SwitchError>;
}

/// Check that a redirect target is safe to hand to the browser.
///
/// Relative references are accepted as-is. Absolute URLs must be http(s).
/// Protocol-relative targets (`//host`, `/\host`, `\\host`) are refused since
/// browsers resolve them to another host, and so are control characters,
/// which cannot go into a `Location` header.
pub fn validate_redirect(target: &str) -> Result<(), SwitchError> {
    if target.trim().is_empty()
        || target.chars().any(char::is_control)
        || target.starts_with("//")
        || target.starts_with("/\\")
        || target.starts_with('\\')
    {
        return Err(SwitchError::InvalidRedirect(target.to_string()));
    }

    match url::Url::parse(target) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(SwitchError::InvalidRedirect(target.to_string())),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(_) => Err(SwitchError::InvalidRedirect(target.to_string())),
    }
}

/// `LanguageApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::switch_language(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SWITCH_LANGUAGE_PATH)
    }

    async fn send_once(&self, code: &str) -> Result<String, SwitchError> {
        let request = SwitchLanguageRequest {
            language: code.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SwitchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SwitchLanguageResponse =
            serde_json::from_str(&body).map_err(|e| SwitchError::Decode(e.to_string()))?;

        validate_redirect(&parsed.redirect_url)?;
        Ok(parsed.redirect_url)
    }
}

#[async_trait]
impl LanguageApi for HttpApiClient {
    async fn switch_language(&self, code: &str) -> Result<String, SwitchError> {
        debug!("Requesting language switch to '{}' via {}", code, self.endpoint());

        let redirect = with_retry_if(
            &self.retry,
            "switch_language",
            || self.send_once(code),
            SwitchError::is_retryable,
        )
        .await?;

        info!("Language switch to '{}' accepted, redirecting to {}", code, redirect);
        Ok(redirect)
    }
}
