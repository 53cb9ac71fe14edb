//! Error types for the wire library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while encoding messages onto a transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying I/O failure while writing to the destination buffer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An encoded line is longer than the codec allows.
    #[error("line too long: {len} bytes (max {max})")]
    LineTooLong {
        /// Encoded length including CRLF.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Reasons an ISUPPORT token name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The name is empty.
    #[error("token name is empty")]
    Empty,

    /// The name starts with `-`, which is reserved for removal markers.
    #[error("token name {0:?} starts with '-'")]
    LeadingDash(String),

    /// The name starts with `:`, which would turn it into a trailing parameter.
    #[error("token name {0:?} starts with ':'")]
    LeadingColon(String),

    /// The name contains a byte that cannot appear in a token name.
    #[error("token name {name:?} contains invalid byte 0x{byte:02X}")]
    InvalidByte {
        /// The offending name.
        name: String,
        /// The first offending byte.
        byte: u8,
    },
}
