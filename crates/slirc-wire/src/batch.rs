//! IRCv3 `BATCH` reference tags and frames.
//!
//! # Reference
//! - <https://ircv3.net/specs/extensions/batch>

use crate::message::{Command, Message, Prefix};

/// Message tag key that marks a message as part of a batch.
pub const BATCH_TAG: &str = "batch";

/// Render a batch slot id as a reference tag (lowercase base 36).
///
/// Slot ids are unique among running batches, so the tag is too.
pub fn reference_tag(slot: u32) -> String {
    if slot == 0 {
        return "0".to_string();
    }

    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut value = slot;
    let mut buf = Vec::with_capacity(7);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    buf.iter().rev().collect()
}

/// `:<server> BATCH +<reftag> [<type>]`
///
/// An empty type is left off the wire.
pub fn batch_start(server_name: &str, reftag: &str, kind: &str) -> Message {
    let kind = (!kind.is_empty()).then(|| kind.to_string());
    Message::from(Command::BATCH(format!("+{}", reftag), kind))
        .with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// `:<server> BATCH -<reftag>`
pub fn batch_end(server_name: &str, reftag: &str) -> Message {
    Message::from(Command::BATCH(format!("-{}", reftag), None))
        .with_prefix(Prefix::ServerName(server_name.to_string()))
}
