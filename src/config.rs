//! Client configuration from the environment

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("INTERVIEW_API_URL must be an http(s) URL, got {0:?}")]
    InvalidApiUrl(String),
    #[error("INTERVIEW_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Settings read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash
    pub api_url: String,
    /// `None` leaves requests pending until the transport resolves them
    pub request_timeout: Option<Duration>,
    pub log_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match lookup("INTERVIEW_API_URL") {
            Some(url) => {
                let url = url.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidApiUrl(url.to_string()));
                }
                url.trim_end_matches('/').to_string()
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let request_timeout = lookup("INTERVIEW_REQUEST_TIMEOUT_SECS")
            .map(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout(raw)),
            })
            .transpose()?;

        let log_path = lookup("INTERVIEW_LOG_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".mock-interviewer").join("client.log")
            },
            PathBuf::from,
        );

        Ok(Self {
            api_url,
            request_timeout,
            log_path,
        })
    }

    /// Open the log file for appending, creating its directory if needed
    pub fn open_log_file(&self) -> std::io::Result<File> {
        open_append(&self.log_path)
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
