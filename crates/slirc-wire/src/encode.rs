//! Byte-level encoding for IRC messages.
//!
//! [`IrcEncode`] writes messages directly to any [`Write`] implementor. Numeric
//! parameters are byte strings, so encoding never goes through `String`.
//!
//! # Example
//!
//! ```
//! use slirc_wire::{IrcEncode, Message};
//!
//! let msg = Message::privmsg("#channel", "Hello!");
//! let mut buf = Vec::new();
//! msg.encode(&mut buf).unwrap();
//!
//! assert_eq!(&buf, b"PRIVMSG #channel :Hello!\r\n");
//! ```

use std::io::{self, Write};

use crate::message::{Command, Message, Prefix, Tag};

/// A trait for encoding IRC protocol elements directly to a byte stream.
pub trait IrcEncode {
    /// Encode this value to the given writer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<usize>;

    /// Encode this value to a new `Vec<u8>`.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let _ = self.encode(&mut buf);
        buf
    }
}

fn put<W: Write>(w: &mut W, bytes: &[u8]) -> io::Result<usize> {
    w.write_all(bytes)?;
    Ok(bytes.len())
}

/// Escape an IRCv3 tag value.
fn escape_tag_value<W: Write>(w: &mut W, value: &str) -> io::Result<usize> {
    let mut written = 0;
    for b in value.bytes() {
        written += match b {
            b';' => put(w, b"\\:")?,
            b' ' => put(w, b"\\s")?,
            b'\\' => put(w, b"\\\\")?,
            b'\r' => put(w, b"\\r")?,
            b'\n' => put(w, b"\\n")?,
            other => put(w, &[other])?,
        };
    }
    Ok(written)
}

/// Whether a parameter must be sent in trailing (`:`-prefixed) form.
fn needs_trailing(param: &[u8]) -> bool {
    param.is_empty() || param[0] == b':' || param.contains(&b' ')
}

fn encode_params<W: Write, P: AsRef<[u8]>>(w: &mut W, params: &[P]) -> io::Result<usize> {
    let mut written = 0;
    let last = params.len().saturating_sub(1);
    for (i, param) in params.iter().enumerate() {
        let param = param.as_ref();
        written += put(w, b" ")?;
        if i == last && needs_trailing(param) {
            written += put(w, b":")?;
        }
        written += put(w, param)?;
    }
    Ok(written)
}

impl IrcEncode for Tag {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut written = put(w, self.0.as_bytes())?;
        if let Some(ref value) = self.1 {
            written += put(w, b"=")?;
            written += escape_tag_value(w, value)?;
        }
        Ok(written)
    }
}

impl IrcEncode for Prefix {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        match self {
            Prefix::ServerName(name) => put(w, name.as_bytes()),
        }
    }
}

impl IrcEncode for Command {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        match self {
            Command::PRIVMSG(target, text) | Command::NOTICE(target, text) => {
                let name: &[u8] = if matches!(self, Command::PRIVMSG(..)) {
                    b"PRIVMSG"
                } else {
                    b"NOTICE"
                };
                let mut written = put(w, name)?;
                written += put(w, b" ")?;
                written += put(w, target.as_bytes())?;
                written += put(w, b" :")?;
                written += put(w, text.as_bytes())?;
                Ok(written)
            }
            Command::BATCH(reference, kind) => {
                let mut written = put(w, b"BATCH")?;
                match kind {
                    Some(kind) => written += encode_params(w, &[reference.as_str(), kind.as_str()])?,
                    None => written += encode_params(w, &[reference.as_str()])?,
                }
                Ok(written)
            }
            Command::Response(response, params) => {
                let mut written = put(w, response.as_str().as_bytes())?;
                written += encode_params(w, params)?;
                Ok(written)
            }
        }
    }
}

impl IrcEncode for Message {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut written = 0;

        if let Some(ref tags) = self.tags {
            written += put(w, b"@")?;
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    written += put(w, b";")?;
                }
                written += tag.encode(w)?;
            }
            written += put(w, b" ")?;
        }

        if let Some(ref prefix) = self.prefix {
            written += put(w, b":")?;
            written += prefix.encode(w)?;
            written += put(w, b" ")?;
        }

        written += self.command.encode(w)?;
        written += put(w, b"\r\n")?;

        Ok(written)
    }
}
