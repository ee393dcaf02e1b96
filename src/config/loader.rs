//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml
//! structure. Every section has sensible defaults so the CLI also runs
//! without a config file.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::network::SolanaNetwork;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub solana: SolanaSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaSection {
    /// Target cluster: "mainnet" or "devnet"
    #[serde(default = "default_network")]
    pub network: String,
    /// Endpoint override (private RPC provider); empty uses the public
    /// endpoint for the selected network
    #[serde(default)]
    pub rpc_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SolanaSection {
    /// Endpoint override with environment variable precedence.
    /// Checks SOLSCOPE_RPC_URL first, then the config value.
    pub fn get_rpc_override(&self) -> Option<String> {
        if let Ok(url) = std::env::var("SOLSCOPE_RPC_URL") {
            if !url.is_empty() {
                return Some(url);
            }
        }
        if self.rpc_url.is_empty() {
            None
        } else {
            Some(self.rpc_url.clone())
        }
    }

    /// Parse the configured network name
    pub fn network(&self) -> Result<SolanaNetwork, ConfigError> {
        self.network
            .parse()
            .map_err(ConfigError::ValidationError)
    }
}

/// Analysis configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSection {
    /// Signatures requested per analysis (the transaction-count cap)
    #[serde(default = "default_signature_limit")]
    pub signature_limit: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            signature_limit: default_signature_limit(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_network() -> String {
    "mainnet".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_signature_limit() -> usize {
    50
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // network must parse
        self.solana.network()?;

        if self.solana.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.analysis.signature_limit == 0 {
            return Err(ConfigError::ValidationError(
                "signature_limit must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
