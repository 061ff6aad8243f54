//! Logscan Configuration Module
//!
//! This module provides the configuration types, defaults and TOML loading
//! for the logscan harvester.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Public mainnet endpoint used when no URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

/// Default commitment level for historical queries.
pub const DEFAULT_COMMITMENT: &str = "finalized";

/// Width of the index range below which the binary search stops narrowing.
pub const DEFAULT_COARSE_THRESHOLD: u64 = 10;

/// Upper bound of the random backward step applied to a failing block probe.
pub const DEFAULT_JITTER_SPAN: u64 = 100;

/// Probes allowed for a single block sample before the search gives up.
pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: u32 = 64;

/// Pause between block probe retries in milliseconds.
pub const DEFAULT_LOCATOR_BACKOFF_MS: u64 = 250;

/// Default signature page size.
pub const DEFAULT_PAGE_LIMIT: usize = 1000;

/// Largest page the reference node accepts for signature listings.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Default number of transaction fetches allowed in flight.
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;

/// Pause between transaction fetch retries in milliseconds.
pub const DEFAULT_FETCH_BACKOFF_MS: u64 = 1000;

/// Default look-back window when no start time is given (10 minutes).
pub const DEFAULT_WINDOW_SECS: i64 = 10 * 60;

/// Prefix the runtime puts in front of program log lines.
pub const PROGRAM_LOG_PREFIX: &str = "Program log: ";

/// Prefix the runtime puts in front of base64 program data (events).
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema.
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which transaction log lines are eligible for harvesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Every log line, unchanged.
    #[default]
    Any,
    /// Only `Program log: ` lines, with the prefix removed.
    Log,
    /// Only `Program data: ` lines, with the prefix removed.
    Data,
}

impl LogKind {
    /// Prefix a line must carry to be selected, if any.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            LogKind::Any => None,
            LogKind::Log => Some(PROGRAM_LOG_PREFIX),
            LogKind::Data => Some(PROGRAM_DATA_PREFIX),
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogKind::Any => write!(f, "any"),
            LogKind::Log => write!(f, "log"),
            LogKind::Data => write!(f, "data"),
        }
    }
}

impl FromStr for LogKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(LogKind::Any),
            "log" | "logs" => Ok(LogKind::Log),
            "data" | "events" => Ok(LogKind::Data),
            other => Err(ConfigError::Invalid(format!("unknown log kind '{other}'"))),
        }
    }
}

/// RPC endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Commitment level passed to every query
    pub commitment: String,
}

/// Block locator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Index range width at which the coarse search stops
    pub coarse_threshold: u64,
    /// Maximum backward step for a failing probe
    pub jitter_span: u64,
    /// Probes per sample before giving up
    pub max_sample_attempts: u32,
    /// Pause between probes in milliseconds
    pub retry_backoff_ms: u64,
}

/// Harvest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Signatures requested per page
    pub page_limit: usize,
    /// Transaction fetches allowed in flight
    pub max_concurrency: usize,
    /// Pause between fetch retries in milliseconds
    pub retry_backoff_ms: u64,
    /// Which log lines are selected
    pub log_kind: LogKind,
    /// Drop records outside the requested window at assembly time
    pub clip_to_window: bool,
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogscanConfig {
    /// RPC configuration
    pub rpc: RpcConfig,
    /// Locator configuration
    pub locator: LocatorConfig,
    /// Harvest configuration
    pub harvest: HarvestConfig,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
            commitment: DEFAULT_COMMITMENT.to_string(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            coarse_threshold: DEFAULT_COARSE_THRESHOLD,
            jitter_span: DEFAULT_JITTER_SPAN,
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            retry_backoff_ms: DEFAULT_LOCATOR_BACKOFF_MS,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            retry_backoff_ms: DEFAULT_FETCH_BACKOFF_MS,
            log_kind: LogKind::Any,
            clip_to_window: false,
        }
    }
}

impl LogscanConfig {
    /// Load configuration from a TOML file.
    ///
    /// Sections and keys missing from the file keep their defaults.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: LogscanConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rpc.url.trim().is_empty() {
            return Err(ConfigError::Invalid("rpc.url must not be empty".to_string()));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "rpc.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.locator.coarse_threshold == 0 {
            return Err(ConfigError::Invalid(
                "locator.coarse_threshold must be greater than 0".to_string(),
            ));
        }
        if self.locator.jitter_span == 0 {
            return Err(ConfigError::Invalid(
                "locator.jitter_span must be greater than 0".to_string(),
            ));
        }
        if self.locator.max_sample_attempts == 0 {
            return Err(ConfigError::Invalid(
                "locator.max_sample_attempts must be greater than 0".to_string(),
            ));
        }
        if self.harvest.page_limit == 0 || self.harvest.page_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "harvest.page_limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        if self.harvest.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "harvest.max_concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
