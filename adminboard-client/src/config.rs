//! Configuration management for the console client
//!
//! This module loads configuration from environment variables and provides
//! a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `ADMINBOARD_API_BASE_URL`: REST backend base URL (default: http://localhost:3000/api)
//! - `ADMINBOARD_TIMEOUT_MS`: Per-request deadline in milliseconds (default: 10000)
//! - `ADMINBOARD_DEV_LOGGING`: Log every request and response (default: false)
//! - `ADMINBOARD_STORAGE_DIR`: Directory for persisted client state (default: platform data dir)
//! - `ADMINBOARD_START_PATH`: Path the binary navigates to on start (default: /)
//! - `RUST_LOG`: Log level
//!
//! # Example
//!
//! ```no_run
//! use adminboard_client::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Talking to {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default per-request deadline
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    pub api: ApiConfig,

    /// Persisted state settings
    pub storage: StorageConfig,

    /// Initial navigation target of the binary
    pub start_path: String,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Per-request deadline in milliseconds
    pub timeout_ms: u64,

    /// Log request and response details at debug level
    pub dev_logging: bool,
}

/// Persisted state settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the token and tab state files
    pub dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url =
            env::var("ADMINBOARD_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = env::var("ADMINBOARD_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("ADMINBOARD_TIMEOUT_MS is invalid: {}", e))?;

        if timeout_ms == 0 {
            anyhow::bail!("ADMINBOARD_TIMEOUT_MS must be greater than zero");
        }

        let dev_logging = match env::var("ADMINBOARD_DEV_LOGGING") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("ADMINBOARD_DEV_LOGGING is invalid: {}", raw))?,
            Err(_) => false,
        };

        let dir = env::var("ADMINBOARD_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_storage_dir());

        let start_path = env::var("ADMINBOARD_START_PATH").unwrap_or_else(|_| "/".to_string());

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout_ms,
                dev_logging,
            },
            storage: StorageConfig { dir },
            start_path,
        })
    }
}

impl ApiConfig {
    /// Settings for `base_url` with default timeout and logging
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            dev_logging: false,
        }
    }

    /// The per-request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URL for a request path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn default_storage_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "adminboard", "adminboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".adminboard"))
}
