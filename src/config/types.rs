//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::classes::ClassBlock;
use super::limits::LimitsConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Limits advertised in the core ISUPPORT set.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// MONITOR configuration.
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Connect classes, in configuration order.
    #[serde(default = "default_classes", rename = "class")]
    pub classes: Vec<ClassBlock>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "irc.straylight.net".to_string(),
                network: "Straylight".to_string(),
                casemapping: Casemapping::default(),
            },
            limits: LimitsConfig::default(),
            monitor: MonitorConfig::default(),
            classes: default_classes(),
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.straylight.net"). Used as the prefix of every
    /// numeric and BATCH frame.
    pub name: String,
    /// Network name (e.g., "Straylight"), advertised as `NETWORK`.
    pub network: String,
    /// Nick/channel case mapping, advertised as `CASEMAPPING`.
    #[serde(default)]
    pub casemapping: Casemapping,
}

/// IRC case mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casemapping {
    /// `rfc1459`: ASCII plus `[]\~` folding to `{}|^`.
    #[default]
    Rfc1459,
    /// `ascii`: only A-Z fold.
    Ascii,
}

impl Casemapping {
    /// The `CASEMAPPING` token value.
    pub fn as_isupport_value(self) -> &'static str {
        match self {
            Casemapping::Rfc1459 => "rfc1459",
            Casemapping::Ascii => "ascii",
        }
    }
}

/// MONITOR configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonitorConfig {
    /// Maximum MONITOR list size (`MONITOR`, default: 30). Zero stops the
    /// token from being advertised.
    #[serde(default = "default_max_monitor")]
    pub max: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max: default_max_monitor(),
        }
    }
}

fn default_max_monitor() -> u32 {
    30
}

fn default_classes() -> Vec<ClassBlock> {
    vec![ClassBlock::new("main")]
}
