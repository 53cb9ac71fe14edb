//! Token contributors.
//!
//! Features that want tokens advertised register an [`IsupportContributor`]
//! with the engine. Contributors run in registration order on every build, so
//! a later contributor sees (and may override) what earlier ones wrote.

use slirc_wire::TokenMap;

use crate::config::Config;
use crate::state::ConnectClass;

/// A feature that adds, overrides, or removes ISUPPORT tokens.
pub trait IsupportContributor: Send + Sync {
    /// Unique name; registering the same name again replaces the contributor.
    fn name(&self) -> &str;

    /// Contribute to the token set shared by every class.
    fn on_build_isupport(&self, _tokens: &mut TokenMap) {}

    /// Contribute to one class's token set, after every global contribution.
    fn on_build_class_isupport(&self, _class: &ConnectClass, _tokens: &mut TokenMap) {}
}

/// `KEYLEN` and per-class `CHANLIMIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTokens {
    max_key: u32,
}

impl ChannelTokens {
    pub const NAME: &'static str = "channels";

    pub fn new(max_key: u32) -> Self {
        Self { max_key }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.limits.max_key)
    }
}

impl IsupportContributor for ChannelTokens {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_build_isupport(&self, tokens: &mut TokenMap) {
        tokens.insert("KEYLEN", self.max_key.to_string());
    }

    fn on_build_class_isupport(&self, class: &ConnectClass, tokens: &mut TokenMap) {
        tokens.insert("CHANLIMIT", format!("#:{}", class.max_channels));
    }
}

/// `MONITOR=<max>`, left out entirely when the limit is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTokens {
    max: u32,
}

impl MonitorTokens {
    pub const NAME: &'static str = "monitor";

    pub fn new(max: u32) -> Self {
        Self { max }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.monitor.max)
    }
}

impl IsupportContributor for MonitorTokens {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_build_isupport(&self, tokens: &mut TokenMap) {
        if self.max > 0 {
            tokens.insert("MONITOR", self.max.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ClassId;

    #[test]
    fn channel_tokens() {
        let contributor = ChannelTokens::new(23);
        let class = ConnectClass {
            id: ClassId(4),
            name: "opers".into(),
            max_channels: 120,
        };

        let mut tokens = TokenMap::new();
        contributor.on_build_isupport(&mut tokens);
        contributor.on_build_class_isupport(&class, &mut tokens);

        assert_eq!(tokens.get("KEYLEN").map(|v| &v[..]), Some(&b"23"[..]));
        assert_eq!(tokens.get("CHANLIMIT").map(|v| &v[..]), Some(&b"#:120"[..]));
    }

    #[test]
    fn monitor_zero_is_omitted() {
        let mut tokens = TokenMap::new();
        MonitorTokens::new(0).on_build_isupport(&mut tokens);
        assert!(tokens.is_empty());

        MonitorTokens::new(100).on_build_isupport(&mut tokens);
        assert_eq!(tokens.get("MONITOR").map(|v| &v[..]), Some(&b"100"[..]));
    }
}
