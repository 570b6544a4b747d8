//! Configuration loading.
//!
//! Loads from `~/.aerodesk/config.toml` (or `$AERODESK_CONFIG_PATH`).
//! Precedence: env vars > config file > defaults. The only setting most
//! deployments touch is the backend base URL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory name under the user's home for all runtime state.
const RUNTIME_DIR: &str = ".aerodesk";

/// Filesystem locations for persistent client state.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    /// `~/.aerodesk`; token, config and logs live under here.
    pub runtime_dir: PathBuf,
    /// Optional `.env` file loaded before reading env overrides.
    pub env_file: PathBuf,
    /// Default directory for shell-mode log files.
    pub logs_dir: PathBuf,
}

/// Resolve the per-user runtime paths.
///
/// # Errors
///
/// Returns an error when the home directory cannot be determined.
pub fn runtime_paths() -> Result<RuntimePaths> {
    let base = directories::BaseDirs::new().context("cannot resolve home directory")?;
    let runtime_dir = base.home_dir().join(RUNTIME_DIR);
    Ok(RuntimePaths {
        env_file: runtime_dir.join(".env"),
        logs_dir: runtime_dir.join("logs"),
        runtime_dir,
    })
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AerodeskConfig {
    /// Backend API settings (`[api]`).
    pub api: ApiConfig,
    /// Console behavior (`[console]`).
    pub console: ConsoleConfig,
}

impl AerodeskConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config from file");
                let config: AerodeskConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file found, using defaults");
                Ok(AerodeskConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve the config file path using a custom env resolver.
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("AERODESK_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        match runtime_paths() {
            Ok(paths) => paths.runtime_dir.join("config.toml"),
            Err(_) => PathBuf::from("config.toml"),
        }
    }

    /// Apply environment variable overrides (env > file > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("AERODESK_API_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = env("AERODESK_PAGE_SIZE") {
            match v.parse() {
                Ok(n) => self.api.page_size = n,
                Err(_) => tracing::warn!(
                    var = "AERODESK_PAGE_SIZE",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("AERODESK_LOG_LEVEL") {
            self.console.log_level = v;
        }
    }

    /// Parse a TOML string into config (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AerodeskConfig =
            toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(config)
    }
}

/// Backend API settings (`[api]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the booking backend, environment-overridable.
    pub base_url: String,
    /// Default page size for list screens.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            page_size: 10,
        }
    }
}

/// Console behavior (`[console]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Tracing log level filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
