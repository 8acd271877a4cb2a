// src/config.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{CodebookError, Result};

pub const DEFAULT_JUDGE0_URL: &str = "https://ce.judge0.com";

/// Connection settings for the Judge0 execution service.
#[derive(Debug, Clone)]
pub struct Judge0Config {
    pub api_base: String,
    pub api_key: Option<String>,
}

/// Fixed-window limit applied to `/run`, keyed by client IP.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub judge0: Judge0Config,
    pub rate_limit: RateLimitConfig,
    /// Applies to the upstream Judge0 call and to reading client requests.
    pub request_timeout: Duration,
    pub json_body_limit: usize,
    /// Optional TOML file replacing the built-in language table.
    pub languages_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            judge0: Judge0Config {
                api_base: DEFAULT_JUDGE0_URL.to_string(),
                api_key: None,
            },
            rate_limit: RateLimitConfig {
                max_requests: 30,
                window: Duration::from_secs(60),
            },
            request_timeout: Duration::from_secs(15),
            json_body_limit: 200 * 1024,
            languages_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = AppConfig::default();

        let judge0 = Judge0Config {
            api_base: get("JUDGE0_URL").unwrap_or(defaults.judge0.api_base),
            api_key: get("JUDGE0_KEY"),
        };

        let rate_limit = RateLimitConfig {
            max_requests: parse_or("RUN_RATE_LIMIT", get("RUN_RATE_LIMIT"), defaults.rate_limit.max_requests)?,
            window: Duration::from_secs(parse_or(
                "RUN_RATE_WINDOW_SECS",
                get("RUN_RATE_WINDOW_SECS"),
                defaults.rate_limit.window.as_secs(),
            )?),
        };
        if rate_limit.max_requests == 0 || rate_limit.window.is_zero() {
            return Err(CodebookError::Config(
                "RUN_RATE_LIMIT and RUN_RATE_WINDOW_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(AppConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            judge0,
            rate_limit,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout.as_secs(),
            )?),
            json_body_limit: parse_or("JSON_BODY_LIMIT", get("JSON_BODY_LIMIT"), defaults.json_body_limit)?,
            languages_file: get("LANGUAGES_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| CodebookError::Config(format!("{} has an invalid value: '{}'", key, raw))),
        None => Ok(default),
    }
}
