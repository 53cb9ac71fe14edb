//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, MonitorConfig)
//! - [`limits`]: Length and count limits advertised through ISUPPORT (LimitsConfig)
//! - [`classes`]: Connect class blocks (ClassBlock)
//! - [`validation`]: Startup/rehash validation

mod classes;
mod limits;
mod types;
mod validation;

pub use classes::ClassBlock;
pub use limits::LimitsConfig;
pub use types::{Casemapping, Config, ConfigError, MonitorConfig, ServerConfig};
pub use validation::{ValidationError, validate};
