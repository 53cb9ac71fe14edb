//! ISUPPORT (RPL_ISUPPORT / 005) token sets for IRC servers.
//!
//! This module provides the server side of ISUPPORT: a case-insensitively
//! ordered token map, value escaping, set differences for incremental updates
//! and packing of a token set into `005` lines.
//!
//! # Reference
//! - Modern IRC documentation: <https://modern.ircdocs.horse/isupport.html>
//! - Value escaping: <https://tools.ietf.org/html/draft-brocklesby-irc-isupport-03>

mod diff;
mod escape;
mod numeric;
mod token;

pub use diff::{apply_difference, difference};
pub use escape::{append_value, escape_value, is_reserved, render_token, unescape_value};
pub use numeric::{build_numerics, NumericLine, ISUPPORT_TRAILER, MAX_TOKENS_PER_LINE};
pub use token::{TokenMap, TokenName};
