//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/bizsvc/config.toml` (XDG) or platform config dir
//! 2. Project config: `.bizsvc.toml`
//! 3. Environment variables: `BIZSVC_*`
//!
//! ```toml
//! [store]
//! path = "/var/lib/bizsvc/contacts.json"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional. Without a `store.path` the contacts file lives in
//! the platform data directory.

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Where the contacts store keeps its data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the store. Falls back to [`StoreConfig::default_path`].
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// File name used inside the data directory when no path is configured.
    pub const DEFAULT_FILE: &'static str = "contacts.json";

    /// Configured path, or `<data_dir>/bizsvc/contacts.json`.
    pub fn effective_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(Self::default_path)
    }

    fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bizsvc")
            .join(Self::DEFAULT_FILE)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive (e.g. "info", "bizsvc=debug").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// The layered provider stack used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(".bizsvc.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("BIZSVC_").split("_"))
    }

    /// Extract a config from any figment.
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// User config path: ~/.config/bizsvc/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("bizsvc").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("bizsvc").join("config.toml"))
            .unwrap_or_default()
    }
}
