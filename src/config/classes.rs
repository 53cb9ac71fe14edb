//! Connect class configuration.

use serde::Deserialize;

/// A `[[class]]` block.
///
/// Sessions are assigned to a class by the host; the class decides the
/// per-class part of the ISUPPORT set (currently `CHANLIMIT`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassBlock {
    /// Class name, unique within the configuration.
    pub name: String,
    /// Maximum channels a session in this class may join (default: 20).
    #[serde(default = "default_max_channels")]
    pub max_channels: u32,
}

impl ClassBlock {
    /// Create a class block with default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_channels: default_max_channels(),
        }
    }
}

fn default_max_channels() -> u32 {
    20
}
