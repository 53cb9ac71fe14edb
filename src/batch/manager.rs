//! Batch lifecycle, slot allocation, and per-session membership.

use std::collections::HashMap;
use std::sync::Arc;

use slirc_wire::batch::{batch_end, batch_start};
use slirc_wire::{reference_tag, Tag, BATCH_TAG};
use tracing::debug;

use super::types::{Batch, BatchHandle, BatchRuntime, BatchState};
use crate::caps::CapabilityQuery;
use crate::metrics;
use crate::state::{deliver, IntExtItem, Session, SessionRegistry};
use crate::telemetry::spans;

/// Number of batches that can run at once.
///
/// Each running batch owns one bit of the per-session `u64`; the top bit is
/// never handed out.
pub const MAX_BATCHES: u32 = u64::BITS - 1;

/// Owns every batch and the active-batch list.
///
/// Slots are allocated as one past the slot of the most recently started
/// batch still running, and restart at zero once nothing is running. Ending a
/// batch out of order therefore does not free its slot for reuse until every
/// later batch has ended too.
pub struct BatchManager {
    server_name: String,
    cap: Arc<dyn CapabilityQuery>,
    bits: Arc<dyn IntExtItem>,
    batches: HashMap<BatchHandle, Batch>,
    /// Running batches in start order.
    active: Vec<BatchHandle>,
    next_handle: u64,
    unloading: bool,
}

impl BatchManager {
    /// Create a framer.
    ///
    /// `cap` gates participation; `bits` stores each session's membership
    /// mask and must not be shared with anything else.
    pub fn new(
        server_name: impl Into<String>,
        cap: Arc<dyn CapabilityQuery>,
        bits: Arc<dyn IntExtItem>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            cap,
            bits,
            batches: HashMap::new(),
            active: Vec::with_capacity(MAX_BATCHES as usize),
            next_handle: 0,
            unloading: false,
        }
    }

    /// Forget membership bits left over from a previous framer.
    pub fn init(&self, registry: &dyn SessionRegistry) {
        let sessions = registry.local_sessions();
        for session in &sessions {
            self.bits.unset(session.as_ref());
        }
        debug!(sessions = sessions.len(), "Cleared batch membership bits");
    }

    /// Create an idle batch. An empty `kind` leaves the type off the start
    /// frame.
    pub fn create(&mut self, kind: impl Into<String>) -> BatchHandle {
        let handle = BatchHandle(self.next_handle);
        self.next_handle += 1;
        self.batches.insert(handle, Batch::new(kind.into()));
        handle
    }

    /// Destroy a batch, ending it first if it is running.
    pub fn release(&mut self, handle: BatchHandle) {
        self.end(handle);
        self.batches.remove(&handle);
    }

    /// Current state, or `None` for an unknown handle.
    pub fn state(&self, handle: BatchHandle) -> Option<BatchState> {
        self.batches.get(&handle).map(Batch::state)
    }

    pub fn is_running(&self, handle: BatchHandle) -> bool {
        matches!(self.state(handle), Some(BatchState::Running { .. }))
    }

    /// Slot held by a running batch.
    pub fn slot(&self, handle: BatchHandle) -> Option<u32> {
        self.runtime(handle).map(|runtime| runtime.slot)
    }

    /// Reference tag of a running batch.
    pub fn reftag(&self, handle: BatchHandle) -> Option<&str> {
        self.runtime(handle).map(|runtime| runtime.reftag.as_str())
    }

    pub fn kind(&self, handle: BatchHandle) -> Option<&str> {
        self.batches.get(&handle).map(|batch| batch.kind.as_str())
    }

    /// Number of sessions that have received the start frame.
    pub fn member_count(&self, handle: BatchHandle) -> usize {
        self.runtime(handle).map_or(0, |runtime| runtime.members.len())
    }

    /// The `batch=<reftag>` tag for messages in a running batch.
    pub fn tag(&self, handle: BatchHandle) -> Option<Tag> {
        self.runtime(handle)
            .map(|runtime| Tag::new(BATCH_TAG, Some(runtime.reftag.clone())))
    }

    /// Number of running batches.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.unloading
    }

    /// Start a batch.
    ///
    /// Does nothing while shutting down, if the batch is already running, or
    /// if no slot is available. Callers that care check [`is_running`]
    /// afterwards.
    ///
    /// [`is_running`]: Self::is_running
    pub fn start(&mut self, handle: BatchHandle) {
        if self.unloading {
            debug!(?handle, "Refusing batch start during shutdown");
            metrics::record_batch_refused("shutdown");
            return;
        }

        let slot = self.next_slot();
        let Some(batch) = self.batches.get_mut(&handle) else {
            return;
        };
        if batch.runtime.is_some() {
            return;
        }
        if slot >= MAX_BATCHES {
            debug!(kind = %batch.kind, slot, "No free batch slot");
            metrics::record_batch_refused("exhausted");
            return;
        }

        let reftag = reference_tag(slot);
        let _span = spans::batch(&batch.kind, &reftag).entered();
        let start = Arc::new(batch_start(&self.server_name, &reftag, &batch.kind));
        let end = Arc::new(batch_end(&self.server_name, &reftag));
        batch.runtime = Some(BatchRuntime {
            slot,
            reftag,
            start,
            end,
            members: Vec::new(),
        });
        self.active.push(handle);

        debug!(slot, "Started batch");
        metrics::record_batch_started();
        metrics::set_active_batches(self.active.len());
    }

    /// Decide whether `session` gets a message tagged with this batch.
    ///
    /// False if the session has not negotiated the capability (or the batch
    /// is not running). Otherwise true, and the start frame is sent first if
    /// this is the session's first message in the batch.
    pub fn should_include_member(&mut self, session: &Arc<dyn Session>, handle: BatchHandle) -> bool {
        if !self.cap.is_enabled(session.as_ref()) {
            return false;
        }
        let Some(runtime) = self
            .batches
            .get_mut(&handle)
            .and_then(|batch| batch.runtime.as_mut())
        else {
            return false;
        };

        let bits = self.bits.get(session.as_ref());
        let bit = runtime.bit();
        if bits & bit == 0 {
            deliver(session.as_ref(), Arc::clone(&runtime.start));
            runtime.members.push(Arc::clone(session));
            self.bits.set(session.as_ref(), bits | bit);
        }
        true
    }

    /// End a running batch.
    ///
    /// Every member gets the end frame in the order it got the start frame,
    /// and loses its bit. The batch may be started again afterwards.
    pub fn end(&mut self, handle: BatchHandle) {
        let Some(batch) = self.batches.get_mut(&handle) else {
            return;
        };
        let Some(runtime) = batch.runtime.take() else {
            return;
        };
        let _span = spans::batch(&batch.kind, &runtime.reftag).entered();

        let bit = runtime.bit();
        for member in &runtime.members {
            deliver(member.as_ref(), Arc::clone(&runtime.end));
            let bits = self.bits.get(member.as_ref());
            self.bits.set(member.as_ref(), bits & !bit);
        }

        if let Some(index) = self.active.iter().position(|h| *h == handle) {
            self.active.remove(index);
        }

        debug!(members = runtime.members.len(), "Ended batch");
        metrics::set_active_batches(self.active.len());
    }

    /// Drop a disconnecting session from every batch it belongs to.
    pub fn remove_member(&mut self, session: &dyn Session) {
        let bits = self.bits.get(session);
        if bits == 0 {
            return;
        }

        let id = session.id();
        for handle in &self.active {
            let Some(runtime) = self
                .batches
                .get_mut(handle)
                .and_then(|batch| batch.runtime.as_mut())
            else {
                continue;
            };
            if bits & runtime.bit() == 0 {
                continue;
            }
            if let Some(index) = runtime.members.iter().position(|m| m.id() == id) {
                runtime.members.remove(index);
            }
        }
        self.bits.unset(session);
    }

    /// Refuse further starts and end every running batch, newest first.
    pub fn shutdown(&mut self) {
        self.unloading = true;
        while let Some(handle) = self.active.last().copied() {
            self.end(handle);
            // `end` always unlinks a running batch; this guards a handle that
            // is somehow no longer running.
            if self.active.last() == Some(&handle) {
                self.active.pop();
            }
        }
        debug!("Batch framer shut down");
    }

    fn runtime(&self, handle: BatchHandle) -> Option<&BatchRuntime> {
        self.batches
            .get(&handle)
            .and_then(|batch| batch.runtime.as_ref())
    }

    /// One past the slot of the last active batch, or zero.
    fn next_slot(&self) -> u32 {
        self.active
            .last()
            .and_then(|handle| self.slot(*handle))
            .map_or(0, |slot| slot + 1)
    }
}
