//! Batch bookkeeping types.

use slirc_wire::Message;
use std::sync::Arc;

use crate::state::Session;

/// Handle to a batch owned by a [`BatchManager`](super::BatchManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchHandle(pub(super) u64);

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    /// Running in `slot`.
    Running { slot: u32 },
}

/// Frames and recipients of a running batch.
///
/// Exists exactly while the batch is running; ending the batch drops it.
pub(super) struct BatchRuntime {
    pub slot: u32,
    pub reftag: String,
    pub start: Arc<Message>,
    pub end: Arc<Message>,
    /// Sessions that got the start frame, in delivery order.
    pub members: Vec<Arc<dyn Session>>,
}

impl BatchRuntime {
    #[inline]
    pub fn bit(&self) -> u64 {
        1u64 << self.slot
    }
}

/// A reusable batch: its type label plus the runtime while running.
pub(super) struct Batch {
    pub kind: String,
    pub runtime: Option<BatchRuntime>,
}

impl Batch {
    pub fn new(kind: String) -> Self {
        Self {
            kind,
            runtime: None,
        }
    }

    pub fn state(&self) -> BatchState {
        match &self.runtime {
            Some(runtime) => BatchState::Running { slot: runtime.slot },
            None => BatchState::Idle,
        }
    }
}
