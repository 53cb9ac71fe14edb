//! ISUPPORT advertisement engine.
//!
//! Builds the `005` token set for every connect class, caches the packed lines,
//! and on rebuild pushes only what changed to registered sessions. The token
//! model itself (maps, escaping, diffing, packing) lives in `slirc_wire`.

mod base;
mod contributors;
mod engine;

pub use base::CoreTokens;
pub use contributors::{ChannelTokens, IsupportContributor, MonitorTokens};
pub use engine::IsupportManager;
