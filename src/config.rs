use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::services::signal_service::DEFAULT_WINDOW;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must be between {min} and {max}")]
    OutOfRange { key: &'static str, min: u64, max: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(()),
        }
    }
}

/// Settings for one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub window: usize,
    pub history_days: u32,
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            history_days: 180,
            max_retries: 3,
            retry_backoff: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub provider: ProviderKind,
    pub fetch_timeout: Duration,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(&lookup, "PORT", 3000_u16)?;

        let provider = match lookup("PRICE_PROVIDER") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "PRICE_PROVIDER",
                value: v.clone(),
            })?,
            None => ProviderKind::Yahoo,
        };

        let timeout_secs = parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10_u64)?;
        check_range("FETCH_TIMEOUT_SECS", timeout_secs, 1, 120)?;

        let window = parse_or(&lookup, "SIGNAL_WINDOW", DEFAULT_WINDOW)?;
        check_range("SIGNAL_WINDOW", window as u64, 2, 120)?;

        let history_days = parse_or(&lookup, "HISTORY_DAYS", 180_u32)?;
        check_range("HISTORY_DAYS", history_days as u64, 30, 1825)?;

        let max_retries = parse_or(&lookup, "FETCH_MAX_RETRIES", 3_u32)?;
        let backoff_ms = parse_or(&lookup, "FETCH_RETRY_BACKOFF_MS", 5000_u64)?;

        Ok(Self {
            host,
            port,
            provider,
            fetch_timeout: Duration::from_secs(timeout_secs),
            analysis: AnalysisConfig {
                window,
                history_days,
                max_retries,
                retry_backoff: Duration::from_millis(backoff_ms),
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, min, max })
    }
}
