//! Configuration handling for the service.
//!
//! Everything is read from environment variables with development defaults,
//! so a bare `cargo run --bin api` works against the public inference API.
//! `Config::from_env` rejects values that do not parse instead of silently
//! falling back to a default.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names. Public so tests and deployment tooling can
/// refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_INFERENCE_URL: &str = "INFERENCE_URL";
pub const ENV_INFERENCE_TOKEN: &str = "INFERENCE_TOKEN";
pub const ENV_INFERENCE_TIMEOUT_SECS: &str = "INFERENCE_TIMEOUT_SECS";
pub const ENV_RATE_LIMIT_MAX_REQUESTS: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "RATE_LIMIT_WINDOW_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_ENV: &str = "development";
const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 3600;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    environment: String,
    inference_url: String,
    inference_token: Option<String>,
    inference_timeout_secs: u64,
    rate_limit_max_requests: u32,
    rate_limit_window_secs: i64,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let environment = env::var(ENV_APP_ENV).unwrap_or_else(|_| DEFAULT_APP_ENV.to_string());
        let inference_url =
            env::var(ENV_INFERENCE_URL).unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string());
        let inference_token = env::var(ENV_INFERENCE_TOKEN)
            .ok()
            .filter(|token| !token.trim().is_empty());

        url::Url::parse(&inference_url).map_err(|e| ConfigError::InvalidValue {
            field: ENV_INFERENCE_URL,
            reason: e.to_string(),
        })?;

        let inference_timeout_secs =
            parse_var(ENV_INFERENCE_TIMEOUT_SECS, DEFAULT_INFERENCE_TIMEOUT_SECS)?;
        let rate_limit_max_requests =
            parse_var(ENV_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_MAX_REQUESTS)?;
        let rate_limit_window_secs =
            parse_var(ENV_RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_WINDOW_SECS)?;
        if rate_limit_window_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_WINDOW_SECS,
                reason: "must be positive".to_string(),
            });
        }
        let log_format = parse_var(ENV_LOG_FORMAT, LogFormat::Text)?;

        Ok(Self {
            bind_addr,
            environment,
            inference_url,
            inference_token,
            inference_timeout_secs,
            rate_limit_max_requests,
            rate_limit_window_secs,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Deployment environment name, reported by the health endpoint.
    pub fn environment(&self) -> &str {
        &self.environment
    }
    /// Base URL of the model inference API.
    pub fn inference_url(&self) -> &str {
        &self.inference_url
    }
    pub fn inference_token(&self) -> Option<&str> {
        self.inference_token.as_deref()
    }
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }
    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }
    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Override the inference endpoint, used by tests pointing at a mock server.
    pub fn with_inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = url.into();
        self
    }

    pub fn with_rate_limit(mut self, max_requests: u32, window_secs: i64) -> Self {
        self.rate_limit_max_requests = max_requests;
        self.rate_limit_window_secs = window_secs;
        self
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        // not `Default` impl yet to keep explicit semantics
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            environment: DEFAULT_APP_ENV.to_string(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            inference_token: None,
            inference_timeout_secs: DEFAULT_INFERENCE_TIMEOUT_SECS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            log_format: LogFormat::Text,
        }
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_APP_ENV,
            ENV_INFERENCE_URL,
            ENV_INFERENCE_TOKEN,
            ENV_INFERENCE_TIMEOUT_SECS,
            ENV_RATE_LIMIT_MAX_REQUESTS,
            ENV_RATE_LIMIT_WINDOW_SECS,
            ENV_LOG_FORMAT,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.bind_addr(), super::DEFAULT_BIND_ADDR);
        assert_eq!(cfg.environment(), super::DEFAULT_APP_ENV);
        assert_eq!(cfg.inference_token(), None);
        assert_eq!(cfg.inference_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.rate_limit_max_requests(), 100);
        assert_eq!(cfg.rate_limit_window_secs(), 3600);
        assert_eq!(cfg.log_format(), LogFormat::Text);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_APP_ENV, "production");
            env::set_var(ENV_INFERENCE_URL, "http://models.internal:8000");
            env::set_var(ENV_INFERENCE_TOKEN, "hf_secret");
            env::set_var(ENV_INFERENCE_TIMEOUT_SECS, "15");
            env::set_var(ENV_RATE_LIMIT_MAX_REQUESTS, "10");
            env::set_var(ENV_RATE_LIMIT_WINDOW_SECS, "60");
            env::set_var(ENV_LOG_FORMAT, "JSON");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.environment(), "production");
        assert_eq!(cfg.inference_url(), "http://models.internal:8000");
        assert_eq!(cfg.inference_token(), Some("hf_secret"));
        assert_eq!(cfg.inference_timeout(), Duration::from_secs(15));
        assert_eq!(cfg.rate_limit_max_requests(), 10);
        assert_eq!(cfg.rate_limit_window_secs(), 60);
        assert_eq!(cfg.log_format(), LogFormat::Json);
        clear_env();
    }

    #[test]
    fn blank_token_is_ignored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_INFERENCE_TOKEN, "   ");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.inference_token(), None);
        clear_env();
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_INFERENCE_TIMEOUT_SECS, "soon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: ENV_INFERENCE_TIMEOUT_SECS,
                ..
            }
        ));
        clear_env();
    }

    #[test]
    fn non_positive_window_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_RATE_LIMIT_WINDOW_SECS, "0");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn invalid_inference_url_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_INFERENCE_URL, "not a url");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_INFERENCE_URL));
        clear_env();
    }
}
