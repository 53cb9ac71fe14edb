//! Configuration validation.
//!
//! Validates configuration at startup and on rehash to catch common errors
//! early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("at least one [[class]] block is required")]
    NoClasses,
    #[error("class name is required")]
    EmptyClassName,
    #[error("duplicate class name '{0}'")]
    DuplicateClass(String),
    #[error("class '{0}' must allow at least one channel")]
    ZeroMaxChannels(String),
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(' ') {
        errors.push(ValidationError::InvalidServerName(config.server.name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    if config.classes.is_empty() {
        errors.push(ValidationError::NoClasses);
    }
    let mut seen = HashSet::new();
    for class in &config.classes {
        if class.name.is_empty() {
            errors.push(ValidationError::EmptyClassName);
            continue;
        }
        if !seen.insert(class.name.to_ascii_lowercase()) {
            errors.push(ValidationError::DuplicateClass(class.name.clone()));
        }
        if class.max_channels == 0 {
            errors.push(ValidationError::ZeroMaxChannels(class.name.clone()));
        }
    }

    let limits = &config.limits;
    for (name, value) in [
        ("max_line", limits.max_line),
        ("max_nick", limits.max_nick),
        ("max_channel", limits.max_channel),
        ("max_modes", limits.max_modes),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_config() -> String {
        r#"
[server]
name = "test.server"
network = "TestNet"
"#
        .to_string()
    }

    #[test]
    fn test_valid_config_passes() {
        let config = Config::parse(&minimal_valid_config()).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_server_name_fails() {
        let toml = r#"
[server]
name = ""
network = "TestNet"
"#;
        let config = Config::parse(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingServerName)));
    }

    #[test]
    fn test_duplicate_class_fails() {
        let toml = r#"
[server]
name = "test"
network = "TestNet"

[[class]]
name = "main"

[[class]]
name = "MAIN"
max_channels = 0
"#;
        let config = Config::parse(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateClass(n) if n == "MAIN")));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroMaxChannels(_))));
    }

    #[test]
    fn test_all_errors_are_reported() {
        let toml = r#"
[server]
name = "bad name"
network = ""

[limits]
max_line = 0
"#;
        let config = Config::parse(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroLimit("max_line"))));
    }
}
