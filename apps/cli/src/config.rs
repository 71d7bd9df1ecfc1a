use std::time::Duration;

use anyhow::{bail, Context};
use cashly_api_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("CASHLY_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_token = lookup("CASHLY_API_TOKEN").filter(|s| !s.trim().is_empty());
        let timeout_ms: u64 = match lookup("CASHLY_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid CASHLY_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => DEFAULT_TIMEOUT_SECS * 1000,
        };
        let log_format = match lookup("CASHLY_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") => LogFormat::Text,
            Some(value) if value.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(other) => bail!("Invalid CASHLY_LOG_FORMAT '{}'", other),
        };

        Ok(Self {
            api_url,
            api_token,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}
