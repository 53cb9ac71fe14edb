//! Packing token sets into `RPL_ISUPPORT` lines.

use bytes::Bytes;
use smallvec::SmallVec;

use super::escape::render_token;
use super::token::TokenMap;
use crate::message::Message;
use crate::response::Response;

/// Maximum number of token parameters carried by a single `005` line.
pub const MAX_TOKENS_PER_LINE: usize = 12;

/// Trailing parameter of every `005` line.
pub const ISUPPORT_TRAILER: &str = "are supported by this server";

/// One `RPL_ISUPPORT` line without its target.
///
/// Lines are built once per token set and shared between every session that
/// receives them; the target nick is filled in by [`NumericLine::to_message`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumericLine {
    tokens: SmallVec<[Bytes; MAX_TOKENS_PER_LINE]>,
}

impl NumericLine {
    /// Rendered token parameters, in wire order.
    pub fn tokens(&self) -> &[Bytes] {
        &self.tokens
    }

    /// Number of token parameters.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the line carries no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Build the `005` message for one recipient.
    pub fn to_message(&self, server_name: &str, target: &str) -> Message {
        let mut params = Vec::with_capacity(self.tokens.len() + 2);
        params.push(Bytes::copy_from_slice(target.as_bytes()));
        params.extend(self.tokens.iter().cloned());
        params.push(Bytes::from_static(ISUPPORT_TRAILER.as_bytes()));
        Message::numeric(server_name, Response::RPL_ISUPPORT, params)
    }
}

/// Pack a token set into `005` lines.
///
/// Tokens are taken in map order, [`MAX_TOKENS_PER_LINE`] per line; an empty
/// map produces no lines.
pub fn build_numerics(tokens: &TokenMap) -> Vec<NumericLine> {
    let mut lines = Vec::with_capacity(tokens.len().div_ceil(MAX_TOKENS_PER_LINE));
    let mut current = NumericLine::default();

    for (name, value) in tokens {
        current.tokens.push(render_token(name, value));
        if current.tokens.len() == MAX_TOKENS_PER_LINE {
            lines.push(std::mem::take(&mut current));
        }
    }

    if !current.tokens.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> TokenMap {
        (0..count)
            .map(|i| (format!("TOKEN{:02}", i), Bytes::from(i.to_string())))
            .collect()
    }

    #[test]
    fn test_empty_map_has_no_lines() {
        assert!(build_numerics(&TokenMap::new()).is_empty());
    }

    #[test]
    fn test_exactly_twelve_tokens_is_one_line() {
        let lines = build_numerics(&numbered(12));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 12);
    }

    #[test]
    fn test_thirteen_tokens_spill_to_second_line() {
        let lines = build_numerics(&numbered(13));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 12);
        assert_eq!(lines[1].tokens(), &[Bytes::from_static(b"TOKEN12=12")]);
    }

    #[test]
    fn test_to_message_adds_target_and_trailer() {
        let mut tokens = TokenMap::new();
        tokens.insert("NETWORK", "Foo");
        tokens.insert_flag("WHOX");
        let lines = build_numerics(&tokens);
        let msg = lines[0].to_message("irc.test", "alice");
        let (response, params) = msg.numeric_params().unwrap();
        assert_eq!(response, Response::RPL_ISUPPORT);
        assert_eq!(params.len(), 4);
        assert_eq!(&params[0][..], b"alice");
        assert_eq!(&params[3][..], ISUPPORT_TRAILER.as_bytes());
        assert_eq!(
            msg.to_string(),
            ":irc.test 005 alice NETWORK=Foo WHOX :are supported by this server\r\n"
        );
    }
}
