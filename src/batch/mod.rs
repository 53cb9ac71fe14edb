//! IRCv3 batch framing.
//!
//! A batch wraps a run of messages for one client between `BATCH +ref` and
//! `BATCH -ref`. The framer sends the start frame lazily, the first time a
//! session is picked as a recipient of a tagged message, and remembers who
//! got it with one bit per slot in a per-session integer. Ending the batch
//! sends the end frame to exactly those sessions.
//!
//! # Reference
//! - <https://ircv3.net/specs/extensions/batch>

mod manager;
mod types;

pub use manager::{BatchManager, MAX_BATCHES};
pub use types::{BatchHandle, BatchState};
