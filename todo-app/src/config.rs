//! Configuration management for the todo front-end.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset variables fall back to their default; a variable that is set but
//! cannot be parsed is reported as a [`ConfigError`].

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Base URL of the public read API
pub const DEFAULT_API_URL: &str = "https://mate.academy/students-api";

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "todoview=info,todoview_runtime=warn";

/// A configuration variable held an unusable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value could not be parsed
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        expected: &'static str,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// User whose todos are shown (`TODOVIEW_USER_ID`, unset or 0 for none)
    pub user_id: Option<UserId>,
    /// Base URL of the read API (`TODOVIEW_API_URL`)
    pub api_url: String,
    /// Auto-dismiss delay of the error notice in milliseconds
    /// (`TODOVIEW_ERROR_DISMISS_MS`)
    pub error_dismiss_ms: u64,
    /// HTTP client timeout in seconds (`TODOVIEW_HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,
    /// Fallback log filter (`TODOVIEW_LOG`)
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            error_dismiss_ms: 3000,
            http_timeout_secs: 10,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable is set to
    /// something that is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let user_id = parse_var::<u64, _>(&lookup, "TODOVIEW_USER_ID", "user id")?
            .and_then(UserId::new);

        Ok(Self {
            user_id,
            api_url: lookup("TODOVIEW_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            error_dismiss_ms: parse_var(&lookup, "TODOVIEW_ERROR_DISMISS_MS", "duration in milliseconds")?
                .unwrap_or(defaults.error_dismiss_ms),
            http_timeout_secs: parse_var(&lookup, "TODOVIEW_HTTP_TIMEOUT_SECS", "duration in seconds")?
                .unwrap_or(defaults.http_timeout_secs),
            log_filter: lookup("TODOVIEW_LOG").unwrap_or(defaults.log_filter),
        })
    }

    /// Set the user
    #[must_use]
    pub const fn with_user_id(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the auto-dismiss delay
    #[must_use]
    pub fn with_error_dismiss_delay(mut self, delay: Duration) -> Self {
        self.error_dismiss_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the HTTP client timeout
    #[must_use]
    pub const fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout_secs = timeout.as_secs();
        self
    }

    /// Auto-dismiss delay of the error notice
    #[must_use]
    pub const fn error_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }

    /// HTTP client timeout
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_var<T, F>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            var,
            value,
            expected,
        })
}
