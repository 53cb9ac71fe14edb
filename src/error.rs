//! Crate-level error types.
//!
//! Configuration errors live in [`crate::config`]; token-name errors come from
//! the wire crate. What remains here is delivery: the engines push frames into
//! session queues and must survive a queue that is gone or full.

use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;

/// A frame could not be queued for a session.
///
/// Engines never propagate this. A failed delivery is logged and counted, and
/// the remaining recipients are still served.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The session's writer has gone away.
    #[error("session queue closed")]
    Closed,

    /// The session's outbound queue is at capacity.
    #[error("session queue full")]
    Full,
}

impl DeliveryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Full => "full",
        }
    }
}

impl<T> From<TrySendError<T>> for DeliveryError {
    fn from(err: TrySendError<T>) -> Self {
        match err {
            TrySendError::Full(_) => Self::Full,
            TrySendError::Closed(_) => Self::Closed,
        }
    }
}
