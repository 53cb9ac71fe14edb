//! IRC message encoder for tokio.
//!
//! Outbound queues carry `Arc<Message>` so a frame built once (a batch start,
//! a shared `005` line) can be queued to many sessions; the codec writes it
//! with [`IrcEncode`] straight into the frame buffer.

use std::sync::Arc;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::encode::IrcEncode;
use crate::error;
use crate::message::Message;

/// Default maximum encoded line length: 8191 bytes of tags plus a 512 byte line.
pub const DEFAULT_MAX_LINE: usize = 8191 + 512;

/// Tokio encoder for IRC messages.
#[derive(Debug, Clone)]
pub struct IrcCodec {
    max_len: usize,
}

impl IrcCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE)
    }

    /// Create a codec with a custom maximum line length in bytes.
    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Default for IrcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<&Message> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: &Message, dst: &mut BytesMut) -> error::Result<()> {
        let start = dst.len();
        let mut writer = (&mut *dst).writer();
        let len = msg.encode(&mut writer)?;
        if len > self.max_len {
            dst.truncate(start);
            return Err(error::ProtocolError::LineTooLong {
                len,
                max: self.max_len,
            });
        }
        Ok(())
    }
}

impl Encoder<Arc<Message>> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Arc<Message>, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<&Message>::encode(self, msg.as_ref(), dst)
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<&Message>::encode(self, &msg, dst)
    }
}
