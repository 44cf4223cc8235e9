//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use chrono_tz::Tz;
use std::env;
use std::time::Duration;

/// Default page size used by the activity search.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Default HTTP request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the activity REST API
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
    /// IANA zone used for local times; `None` means the machine's zone
    pub timezone: Option<Tz>,
    /// Number of results per search page
    pub search_page_size: u32,

    // --- Login credentials (optional, used by the binary) ---
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:9499".to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            timezone: None,
            search_page_size: DEFAULT_PAGE_SIZE,
            login_email: None,
            login_password: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timezone = match env::var("APP_TIMEZONE") {
            Ok(name) if !name.trim().is_empty() => Some(
                name.trim()
                    .parse::<Tz>()
                    .map_err(|_| ConfigError::Invalid("APP_TIMEZONE", name.clone()))?,
            ),
            _ => None,
        };

        let request_timeout_ms = match env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::Invalid("REQUEST_TIMEOUT_MS", raw)),
            },
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let search_page_size = match env::var("SEARCH_PAGE_SIZE") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::Invalid("SEARCH_PAGE_SIZE", raw)),
            },
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:9499".to_string()),
            request_timeout: Duration::from_millis(request_timeout_ms),
            timezone,
            search_page_size,
            login_email: env::var("APP_EMAIL").ok().map(|v| v.trim().to_string()),
            login_password: env::var("APP_PASSWORD").ok(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
