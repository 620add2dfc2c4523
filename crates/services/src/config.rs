use std::env;
use std::time::Duration;

use quiz_core::session::DEFAULT_TIME_BUDGET_SECS;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:1000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_BASE_URL: &str = "QUIZ_API_BASE_URL";
pub const ENV_TIME_BUDGET_SECS: &str = "QUIZ_TIME_BUDGET_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "QUIZ_HTTP_TIMEOUT_SECS";

/// Settings for talking to the quiz backend and running attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizClientConfig {
    pub api_base_url: String,
    pub time_budget_secs: u32,
    pub http_timeout: Duration,
}

impl Default for QuizClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl QuizClientConfig {
    /// Read settings from the process environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIME_BUDGET_SECS) {
            config = config.with_time_budget_secs(parse(ENV_TIME_BUDGET_SECS, &raw)?)?;
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = Duration::from_secs(parse(ENV_HTTP_TIMEOUT_SECS, &raw)?);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroTimeBudget` for a zero budget.
    pub fn with_time_budget_secs(mut self, secs: u32) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeBudget);
        }
        self.time_budget_secs = secs;
        Ok(self)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
