use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5288";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 300_000;
pub const DEFAULT_CREDENTIALS_FILE: &str = ".token-board/storage.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined to
    pub base_url: String,

    /// Request timeout, no retries are made
    pub timeout: Duration,

    /// Period of the background token table reload
    pub refresh_interval: Duration,

    /// JSON file standing in for browser local storage
    pub credentials_file: PathBuf,

    /// Token attached at client construction, superseded by stored credentials
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            access_token: None,
        }
    }
}

impl ApiConfig {
    /// Build the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let timeout_secs = parse_var("TOKEN_BOARD_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let refresh_ms = parse_var(
            "TOKEN_BOARD_REFRESH_INTERVAL_MS",
            DEFAULT_REFRESH_INTERVAL_MS,
        )?;

        Ok(Self {
            base_url: env::var("TOKEN_BOARD_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            refresh_interval: Duration::from_millis(refresh_ms),
            credentials_file: env::var("TOKEN_BOARD_CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_FILE)),
            access_token: env::var("TOKEN_BOARD_ACCESS_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64> {
    parse_positive(name, env::var(name).ok(), default)
}

fn parse_positive(name: &str, value: Option<String>, default: u64) -> Result<u64> {
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{} must be a positive integer, got {:?}", name, value))?;
    if parsed == 0 {
        bail!("{} must be a positive integer, got 0", name);
    }
    Ok(parsed)
}
