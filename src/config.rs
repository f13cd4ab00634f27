use anyhow::{bail, Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub admin_root_path: String,

    // Backend API the switcher calls
    pub api_base_url: String,
    pub switch_timeout: Duration,

    // Languages
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port: u16 = match std::env::var("PORT") {
            Ok(v) => v.parse().with_context(|| format!("PORT is not a valid port: {}", v))?,
            Err(_) => 8080,
        };

        let admin_root_path = normalize_root_path(
            &std::env::var("ADMIN_ROOT_PATH").unwrap_or_else(|_| "/admin".to_string()),
        )?;

        let default_language = std::env::var("DEFAULT_LANGUAGE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| "en".to_string());
        if default_language.is_empty() {
            bail!("DEFAULT_LANGUAGE must not be empty");
        }

        Ok(Self {
            port,
            admin_root_path,

            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", port)),
            switch_timeout: Duration::from_secs(
                std::env::var("SWITCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),

            supported_languages: std::env::var("SUPPORTED_LANGUAGES")
                .map(|v| parse_language_list(&v))
                .unwrap_or_else(|_| vec![default_language.clone()]),
            default_language,
            translations_path: std::env::var("TRANSLATIONS_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Path the switcher's menu items post to.
    pub fn switch_action_base(&self) -> String {
        format!("{}/switch-language", self.admin_root_path.trim_end_matches('/'))
    }
}

/// Parse a comma-separated language list, keeping order and dropping blanks.
pub fn parse_language_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_root_path(path: &str) -> Result<String> {
    let trimmed = path.trim();
    if !trimmed.starts_with('/') {
        bail!("ADMIN_ROOT_PATH must start with '/': {}", path);
    }

    let normalized = trimmed.trim_end_matches('/');
    if normalized.is_empty() {
        bail!("ADMIN_ROOT_PATH must not be the site root");
    }

    Ok(normalized.to_string())
}
