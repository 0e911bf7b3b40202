//! Configuration structures
//!
//! Every section has defaults so a partial file (or none at all) still yields
//! a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_MS,
    DEFAULT_ERROR_TTL_MS, DEFAULT_HIGHLIGHT_TTL_MS, DEFAULT_PEOPLE_PER_DAY,
    DEFAULT_WARNING_TTL_MS,
};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Remote roster service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without trailing slash (e.g. `http://127.0.0.1:8000`)
    pub base_url: String,
    pub timeout_ms: u64,
    /// Total attempts per request (initial try + retries).
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_API_TIMEOUT_MS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Lifetimes of the transient notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub error_ttl_ms: u64,
    pub highlight_ttl_ms: u64,
    pub warning_ttl_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            error_ttl_ms: DEFAULT_ERROR_TTL_MS,
            highlight_ttl_ms: DEFAULT_HIGHLIGHT_TTL_MS,
            warning_ttl_ms: DEFAULT_WARNING_TTL_MS,
        }
    }
}

impl FeedbackConfig {
    pub fn error_ttl(&self) -> Duration {
        Duration::from_millis(self.error_ttl_ms)
    }

    pub fn highlight_ttl(&self) -> Duration {
        Duration::from_millis(self.highlight_ttl_ms)
    }

    pub fn warning_ttl(&self) -> Duration {
        Duration::from_millis(self.warning_ttl_ms)
    }
}

/// Roster editing defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Headcount pre-filled for the next generation request.
    pub default_people_per_day: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { default_people_per_day: DEFAULT_PEOPLE_PER_DAY }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "base_url": "http://roster.local" } }"#).unwrap();

        assert_eq!(config.api.base_url, "http://roster.local");
        assert_eq!(config.api.timeout_ms, DEFAULT_API_TIMEOUT_MS);
        assert_eq!(config.feedback, FeedbackConfig::default());
        assert_eq!(config.roster.default_people_per_day, 2);
    }

    #[test]
    fn feedback_durations_follow_millis() {
        let feedback = FeedbackConfig::default();
        assert_eq!(feedback.error_ttl(), Duration::from_secs(5));
        assert_eq!(feedback.highlight_ttl(), Duration::from_secs(5));
        assert_eq!(feedback.warning_ttl(), Duration::from_secs(10));
    }
}
