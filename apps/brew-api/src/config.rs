//! # API Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BREW_PORT=9000                                                     │
//! │     BREW_TAX_RATE_BPS=1200                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BREW_CONFIG, or the platform config dir:                          │
//! │     ~/.config/brew-pos/brew.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [store]
//! name = "Brew & Bean"
//!
//! [ledger]
//! tax_rate_bps = 1200
//! first_order_number = 1
//!
//! [sessions]
//! idle_timeout_secs = 7200
//! max_sessions = 10000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use brew_core::validation::validate_bps;
use brew_core::{LedgerSettings, TaxRate};

use crate::state::SessionLimits;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Brew & Bean".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// VAT in basis points, 1200 = 12%.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
    #[serde(default = "default_first_order_number")]
    pub first_order_number: u64,
}

fn default_tax_rate_bps() -> u32 {
    TaxRate::STANDARD.bps()
}

fn default_first_order_number() -> u64 {
    1
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            tax_rate_bps: default_tax_rate_bps(),
            first_order_number: default_first_order_number(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle sessions older than this are dropped when a new session opens.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_idle_timeout_secs() -> u64 {
    2 * 60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub sessions: SessionConfig,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be greater than 0".into()));
        }

        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        validate_bps("ledger.tax_rate_bps", self.ledger.tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.sessions.max_sessions == 0 {
            return Err(ConfigError::Invalid(
                "sessions.max_sessions must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BREW_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BREW_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("BREW_PORT") {
            debug!(port = %port, "Overriding port from environment");
            self.server.port = parse_value("BREW_PORT", &port)?;
        }

        if let Some(name) = lookup("BREW_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(bps) = lookup("BREW_TAX_RATE_BPS") {
            debug!(bps = %bps, "Overriding tax rate from environment");
            self.ledger.tax_rate_bps = parse_value("BREW_TAX_RATE_BPS", &bps)?;
        }

        if let Some(first) = lookup("BREW_FIRST_ORDER_NUMBER") {
            self.ledger.first_order_number = parse_value("BREW_FIRST_ORDER_NUMBER", &first)?;
        }

        if let Some(secs) = lookup("BREW_SESSION_IDLE_SECS") {
            self.sessions.idle_timeout_secs = parse_value("BREW_SESSION_IDLE_SECS", &secs)?;
        }

        if let Some(max) = lookup("BREW_MAX_SESSIONS") {
            self.sessions.max_sessions = parse_value("BREW_MAX_SESSIONS", &max)?;
        }

        Ok(())
    }

    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            tax_rate: TaxRate::from_bps(self.ledger.tax_rate_bps),
            first_order_number: self.ledger.first_order_number,
        }
    }

    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            idle_timeout: Duration::from_secs(self.sessions.idle_timeout_secs),
            max_sessions: self.sessions.max_sessions,
        }
    }

    /// `$BREW_CONFIG`, else `brew.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("BREW_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "brew", "pos")
            .map(|dirs| dirs.config_dir().join("brew.toml"))
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}
