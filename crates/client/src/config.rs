use std::time::Duration;

use crate::error::ClientError;

/// Connection settings for the layout-storage API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the version prefix, e.g. `http://host:3000/api/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// Extra attempts for idempotent reads (default: `2`). Writes are never
    /// retried.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles on each further attempt.
    pub retry_base_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/v1".to_string(),
            request_timeout_secs: 10,
            max_retries: 2,
            retry_base_delay_ms: 250,
        }
    }
}

impl ClientConfig {
    /// Point a default configuration at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Disable retries (useful for tests and latency-sensitive callers).
    pub fn without_retries(mut self) -> Self {
        self.max_retries = 0;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                         |
    /// |-----------------------------|---------------------------------|
    /// | `MEDBOARD_API_URL`          | `http://localhost:3000/api/v1`  |
    /// | `MEDBOARD_API_TIMEOUT_SECS` | `10`                            |
    /// | `MEDBOARD_API_MAX_RETRIES`  | `2`                             |
    /// | `MEDBOARD_API_RETRY_MS`     | `250`                           |
    pub fn from_env() -> Result<Self, ClientError> {
        let defaults = Self::default();

        let base_url = std::env::var("MEDBOARD_API_URL").unwrap_or(defaults.base_url);
        let request_timeout_secs =
            parse_env("MEDBOARD_API_TIMEOUT_SECS", defaults.request_timeout_secs)?;
        let max_retries = parse_env("MEDBOARD_API_MAX_RETRIES", defaults.max_retries)?;
        let retry_base_delay_ms = parse_env("MEDBOARD_API_RETRY_MS", defaults.retry_base_delay_ms)?;

        Ok(Self {
            base_url,
            request_timeout_secs,
            max_retries,
            retry_base_delay_ms,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff before retry number `attempt` (0-based): base, 2x base, 4x base...
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(factor))
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ClientError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::Config(format!("{key} must be a number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
