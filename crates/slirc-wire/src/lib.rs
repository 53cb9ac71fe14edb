//! # slirc-wire
//!
//! Outbound wire types used by the slircd client-protocol extension layer.
//!
//! ## Features
//!
//! - Owned IRC messages with IRCv3 tags and a server prefix
//! - Byte-level encoding via [`IrcEncode`] (parameters are byte strings, so
//!   ISUPPORT values never need to be valid UTF-8)
//! - ISUPPORT token sets ([`TokenMap`]) with case-insensitive ordering,
//!   draft-brocklesby value escaping, set differences and `RPL_ISUPPORT` packing
//! - IRCv3 `BATCH` reference tags and start/end frames
//! - Optional tokio [`IrcCodec`] for framed writers
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_wire::isupport::{build_numerics, TokenMap};
//!
//! let mut tokens = TokenMap::new();
//! tokens.insert("NETWORK", "Straylight");
//! tokens.insert_flag("WHOX");
//!
//! let lines = build_numerics(&tokens);
//! assert_eq!(lines.len(), 1);
//!
//! let msg = lines[0].to_message("irc.example.net", "nick");
//! assert_eq!(
//!     msg.to_string(),
//!     ":irc.example.net 005 nick NETWORK=Straylight WHOX :are supported by this server\r\n"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod batch;
#[cfg(feature = "tokio")]
pub mod codec;
pub mod encode;
pub mod error;
pub mod isupport;
pub mod message;
pub mod response;

pub use self::batch::{reference_tag, BATCH_TAG};
#[cfg(feature = "tokio")]
pub use self::codec::IrcCodec;
pub use self::encode::IrcEncode;
pub use self::error::{ProtocolError, TokenError};
pub use self::isupport::{NumericLine, TokenMap, TokenName};
pub use self::message::{Command, Message, Prefix, Tag};
pub use self::response::Response;
