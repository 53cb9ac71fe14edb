//! Tokens every server advertises, derived from configuration.

use slirc_wire::TokenMap;

use crate::config::{Casemapping, Config, LimitsConfig};

/// Configuration-derived base of every token set.
///
/// Contributors run on top of this map and may override or delete entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreTokens {
    network: String,
    casemapping: Casemapping,
    limits: LimitsConfig,
}

impl CoreTokens {
    pub fn from_config(config: &Config) -> Self {
        Self {
            network: config.server.network.clone(),
            casemapping: config.server.casemapping,
            limits: config.limits.clone(),
        }
    }

    /// Render the base map.
    pub fn to_map(&self) -> TokenMap {
        let limits = &self.limits;
        let mut tokens = TokenMap::new();
        tokens.insert("AWAYLEN", limits.max_away.to_string());
        tokens.insert("CASEMAPPING", self.casemapping.as_isupport_value());
        tokens.insert("CHANNELLEN", limits.max_channel.to_string());
        tokens.insert("CHANTYPES", "#");
        tokens.insert("HOSTLEN", limits.max_host.to_string());
        tokens.insert("KICKLEN", limits.max_kick.to_string());
        tokens.insert("LINELEN", limits.max_line.to_string());
        tokens.insert("MAXTARGETS", limits.max_targets.to_string());
        tokens.insert("MODES", limits.max_modes.to_string());
        tokens.insert("NETWORK", self.network.clone());
        tokens.insert("NAMELEN", limits.max_real.to_string());
        tokens.insert("NICKLEN", limits.max_nick.to_string());
        tokens.insert("TOPICLEN", limits.max_topic.to_string());
        tokens.insert("USERLEN", limits.max_user.to_string());
        tokens
    }
}
