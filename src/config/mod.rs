//! Configuration handling for the service.
//!
//! Everything comes from environment variables (optionally seeded from a
//! `.env` file by the binary). The fact-check credentials and the classifier
//! endpoint are optional here: their absence is reported by the component
//! that needs them, at call time, so the rest of the service stays usable.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FACT_CHECK_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_FACT_CHECK_BASE_URL: &str = "FACT_CHECK_BASE_URL";
pub const ENV_FACT_CHECK_LANGUAGE: &str = "FACT_CHECK_LANGUAGE";
pub const ENV_FACT_CHECK_TIMEOUT_SECS: &str = "FACT_CHECK_TIMEOUT_SECS";
pub const ENV_CLASSIFIER_URL: &str = "TOXICITY_CLASSIFIER_URL";
pub const ENV_CLASSIFIER_TIMEOUT_SECS: &str = "CLASSIFIER_TIMEOUT_SECS";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FACT_CHECK_LANGUAGE: &str = "pt-BR";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    fact_check_api_key: Option<String>,
    fact_check_base_url: Option<String>,
    fact_check_language: String,
    fact_check_timeout: Duration,
    classifier_url: Option<String>,
    classifier_timeout: Duration,
    static_dir: PathBuf,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    ///
    /// Blank values count as absent. Timeouts must be positive integers.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = var(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let fact_check_language = var(ENV_FACT_CHECK_LANGUAGE)
            .unwrap_or_else(|| DEFAULT_FACT_CHECK_LANGUAGE.to_string());
        let static_dir = var(ENV_STATIC_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let log_format = match var(ENV_LOG_FORMAT).as_deref() {
            None | Some("pretty") | Some("text") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'json' or 'pretty', got '{}'", other),
                });
            }
        };

        Ok(Self {
            bind_addr,
            fact_check_api_key: var(ENV_FACT_CHECK_API_KEY),
            fact_check_base_url: var(ENV_FACT_CHECK_BASE_URL),
            fact_check_language,
            fact_check_timeout: timeout_var(ENV_FACT_CHECK_TIMEOUT_SECS)?,
            classifier_url: var(ENV_CLASSIFIER_URL),
            classifier_timeout: timeout_var(ENV_CLASSIFIER_TIMEOUT_SECS)?,
            static_dir,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// API key for the claim-search service.
    pub fn fact_check_api_key(&self) -> Option<&str> {
        self.fact_check_api_key.as_deref()
    }
    /// Base URL of the claim-search service, e.g. `https://factchecktools.googleapis.com`.
    pub fn fact_check_base_url(&self) -> Option<&str> {
        self.fact_check_base_url.as_deref()
    }
    /// Language code sent with claim searches when detection doesn't override it.
    pub fn fact_check_language(&self) -> &str {
        &self.fact_check_language
    }
    pub fn fact_check_timeout(&self) -> Duration {
        self.fact_check_timeout
    }
    /// Inference endpoint of the toxicity classifier.
    pub fn classifier_url(&self) -> Option<&str> {
        self.classifier_url.as_deref()
    }
    pub fn classifier_timeout(&self) -> Duration {
        self.classifier_timeout
    }
    /// Directory served as static front-end, when it exists.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        // not `Default` impl yet to keep explicit semantics
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fact_check_api_key: None,
            fact_check_base_url: None,
            fact_check_language: DEFAULT_FACT_CHECK_LANGUAGE.to_string(),
            fact_check_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            classifier_url: None,
            classifier_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_format: LogFormat::Pretty,
        }
    }

    pub fn with_fact_check(mut self, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.fact_check_base_url = Some(base_url.into());
        self.fact_check_api_key = Some(api_key.into());
        self
    }

    pub fn with_classifier(mut self, url: impl Into<String>) -> Self {
        self.classifier_url = Some(url.into());
        self
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn timeout_var(key: &'static str) -> Result<Duration, ConfigError> {
    let Some(raw) = var(key) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field: key,
            reason: "timeout must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidValue {
            field: key,
            reason: format!("'{}' is not a number of seconds: {}", raw, e),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
