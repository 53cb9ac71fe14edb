//! Owned outbound IRC messages.

use std::fmt::{self, Display, Formatter};

use bytes::Bytes;

use crate::encode::IrcEncode;
use crate::response::Response;

/// An IRCv3 message tag: key and optional value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tag(pub String, pub Option<String>);

impl Tag {
    /// Create a tag from a key and optional value.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Tag(key.into(), value)
    }

    /// Tag key.
    pub fn key(&self) -> &str {
        &self.0
    }

    /// Tag value, if any.
    pub fn value(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

/// Message source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Prefix {
    /// A server name, e.g. `irc.example.net`.
    ServerName(String),
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
        }
    }
}

/// The commands this layer puts on the wire.
#[derive(Clone, PartialEq, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
    /// `BATCH <+/-reftag> [<type>]`
    BATCH(String, Option<String>),
    /// A numeric reply. Parameters are raw bytes; the last one is sent as the
    /// trailing parameter when it needs to be.
    Response(Response, Vec<Bytes>),
}

/// An owned IRC message.
#[derive(Clone, PartialEq, Debug)]
pub struct Message {
    /// IRCv3 message tags.
    pub tags: Option<Vec<Tag>>,
    /// Message source.
    pub prefix: Option<Prefix>,
    /// Command and parameters.
    pub command: Command,
}

impl Message {
    /// Create a PRIVMSG message to a target with text.
    #[must_use]
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::PRIVMSG(target.into(), text.into()).into()
    }

    /// Create a NOTICE message to a target with text.
    #[must_use]
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::NOTICE(target.into(), text.into()).into()
    }

    /// Create a numeric reply from a server.
    #[must_use]
    pub fn numeric(server_name: &str, response: Response, params: Vec<Bytes>) -> Self {
        Message {
            tags: None,
            prefix: Some(Prefix::ServerName(server_name.to_string())),
            command: Command::Response(response, params),
        }
    }

    /// Attach a tag, keeping any tags already present.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.tags
            .get_or_insert_with(Vec::new)
            .push(Tag::new(key, value));
        self
    }

    /// Set the message source.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Get the value of an IRCv3 tag by key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .as_ref()?
            .iter()
            .find(|tag| tag.0 == key)
            .and_then(|tag| tag.1.as_deref())
    }

    /// Parameters of a numeric reply, if this is one.
    pub fn numeric_params(&self) -> Option<(Response, &[Bytes])> {
        match &self.command {
            Command::Response(response, params) => Some((*response, params)),
            _ => None,
        }
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            tags: None,
            prefix: None,
            command,
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Values may carry non-UTF-8 bytes; Display is for logs and tests.
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tag_appends() {
        let msg = Message::privmsg("#chan", "hi")
            .with_tag("batch", Some("1".to_string()))
            .with_tag("time", Some("2024-01-01T00:00:00.000Z".to_string()));
        assert_eq!(msg.tag_value("batch"), Some("1"));
        assert_eq!(msg.tags.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_numeric_display() {
        let msg = Message::numeric(
            "irc.test",
            Response::RPL_ISUPPORT,
            vec![
                Bytes::from_static(b"nick"),
                Bytes::from_static(b"NETWORK=Test"),
                Bytes::from_static(b"are supported by this server"),
            ],
        );
        assert_eq!(
            msg.to_string(),
            ":irc.test 005 nick NETWORK=Test :are supported by this server\r\n"
        );
    }

    #[test]
    fn test_prefix_display() {
        let prefix = Prefix::ServerName("irc.test".into());
        assert_eq!(prefix.to_string(), "irc.test");
    }
}
