//! Length and count limits advertised to clients.

use serde::Deserialize;

/// Server limits.
///
/// Each field feeds one token of the core ISUPPORT set (`AWAYLEN`,
/// `CHANNELLEN`, ...). Changing a value and rehashing pushes the new token to
/// every registered session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Maximum away message length (`AWAYLEN`, default: 200).
    #[serde(default = "default_max_away")]
    pub max_away: u32,
    /// Maximum channel name length (`CHANNELLEN`, default: 60).
    #[serde(default = "default_max_channel")]
    pub max_channel: u32,
    /// Maximum hostname length (`HOSTLEN`, default: 64).
    #[serde(default = "default_max_host")]
    pub max_host: u32,
    /// Maximum kick reason length (`KICKLEN`, default: 300).
    #[serde(default = "default_max_kick")]
    pub max_kick: u32,
    /// Maximum line length in bytes (`LINELEN`, default: 512).
    #[serde(default = "default_max_line")]
    pub max_line: u32,
    /// Maximum mode changes per MODE command (`MODES`, default: 20).
    #[serde(default = "default_max_modes")]
    pub max_modes: u32,
    /// Maximum nickname length (`NICKLEN`, default: 30).
    #[serde(default = "default_max_nick")]
    pub max_nick: u32,
    /// Maximum realname length (`NAMELEN`, default: 130).
    #[serde(default = "default_max_real")]
    pub max_real: u32,
    /// Maximum topic length (`TOPICLEN`, default: 330).
    #[serde(default = "default_max_topic")]
    pub max_topic: u32,
    /// Maximum username length (`USERLEN`, default: 10).
    #[serde(default = "default_max_user")]
    pub max_user: u32,
    /// Maximum targets per command (`MAXTARGETS`, default: 20).
    #[serde(default = "default_max_targets")]
    pub max_targets: u32,
    /// Maximum channel key length (`KEYLEN`, default: 32).
    #[serde(default = "default_max_key")]
    pub max_key: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_away: default_max_away(),
            max_channel: default_max_channel(),
            max_host: default_max_host(),
            max_kick: default_max_kick(),
            max_line: default_max_line(),
            max_modes: default_max_modes(),
            max_nick: default_max_nick(),
            max_real: default_max_real(),
            max_topic: default_max_topic(),
            max_user: default_max_user(),
            max_targets: default_max_targets(),
            max_key: default_max_key(),
        }
    }
}

fn default_max_away() -> u32 {
    200
}

fn default_max_channel() -> u32 {
    60
}

fn default_max_host() -> u32 {
    64
}

fn default_max_kick() -> u32 {
    300
}

fn default_max_line() -> u32 {
    512
}

fn default_max_modes() -> u32 {
    20
}

fn default_max_nick() -> u32 {
    30
}

fn default_max_real() -> u32 {
    130
}

fn default_max_topic() -> u32 {
    330
}

fn default_max_user() -> u32 {
    10
}

fn default_max_targets() -> u32 {
    20
}

fn default_max_key() -> u32 {
    32
}
