//! Sessions as the engines see them.
//!
//! A session here is a registered-or-registering client connection reduced to
//! what the ISUPPORT and batch engines need: an identity, the nick that fills
//! the target slot of numerics, a connect class, a registration flag, the
//! negotiated capability set, and a fire-and-forget outbound queue.

use parking_lot::RwLock;
use slirc_wire::Message;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use super::class::ConnectClass;
use crate::error::DeliveryError;

/// Unique session identifier.
pub type SessionId = Uuid;

/// A live client session.
pub trait Session: Send + Sync {
    fn id(&self) -> SessionId;

    /// Current nick, or `*` before one is chosen.
    fn nick(&self) -> String;

    /// Current connect class.
    fn class(&self) -> Arc<ConnectClass>;

    /// True once the handshake is complete. Unregistered sessions never
    /// receive rebuild traffic.
    fn is_registered(&self) -> bool;

    /// Whether `cap` has been negotiated.
    fn has_cap(&self, cap: &str) -> bool;

    /// Queue a frame without waiting.
    fn send(&self, msg: Arc<Message>) -> Result<(), DeliveryError>;
}

/// Queue `msg` on `session`, logging and counting a refusal.
///
/// Returns whether the frame was queued. Callers keep going either way.
pub(crate) fn deliver(session: &dyn Session, msg: Arc<Message>) -> bool {
    match session.send(msg) {
        Ok(()) => true,
        Err(e) => {
            crate::metrics::record_delivery_failure(e.error_code());
            warn!(session = %session.id(), error = %e, "Dropped frame for session");
            false
        }
    }
}

/// In-memory session backed by a bounded mpsc queue.
///
/// The receiving half is handed back by [`LocalSession::new`]; whoever owns it
/// plays the role of the connection writer.
#[derive(Debug)]
pub struct LocalSession {
    id: SessionId,
    nick: RwLock<String>,
    class: RwLock<Arc<ConnectClass>>,
    caps: RwLock<HashSet<String>>,
    registered: AtomicBool,
    tx: mpsc::Sender<Arc<Message>>,
}

impl LocalSession {
    /// Create an unregistered session in `class` with a queue of `capacity`
    /// frames.
    pub fn new(
        nick: impl Into<String>,
        class: Arc<ConnectClass>,
        capacity: usize,
    ) -> (Arc<Self>, mpsc::Receiver<Arc<Message>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let session = Arc::new(Self {
            id: Uuid::new_v4(),
            nick: RwLock::new(nick.into()),
            class: RwLock::new(class),
            caps: RwLock::new(HashSet::new()),
            registered: AtomicBool::new(false),
            tx,
        });
        (session, rx)
    }

    /// Mark the handshake complete (or not).
    pub fn set_registered(&self, registered: bool) {
        self.registered.store(registered, Ordering::Release);
    }

    pub fn set_nick(&self, nick: impl Into<String>) {
        *self.nick.write() = nick.into();
    }

    /// Move to `class`, returning the previous class.
    ///
    /// This only updates the session. The host then calls
    /// `IsupportManager::change_class` with both ids so the client hears
    /// about the difference.
    pub fn set_class(&self, class: Arc<ConnectClass>) -> Arc<ConnectClass> {
        std::mem::replace(&mut *self.class.write(), class)
    }

    /// Record a capability as negotiated.
    pub fn enable_cap(&self, cap: impl Into<String>) {
        self.caps.write().insert(cap.into());
    }

    pub fn disable_cap(&self, cap: &str) {
        self.caps.write().remove(cap);
    }
}

impl Session for LocalSession {
    fn id(&self) -> SessionId {
        self.id
    }

    fn nick(&self) -> String {
        let nick = self.nick.read();
        if nick.is_empty() {
            "*".to_string()
        } else {
            nick.clone()
        }
    }

    fn class(&self) -> Arc<ConnectClass> {
        Arc::clone(&self.class.read())
    }

    fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    fn has_cap(&self, cap: &str) -> bool {
        self.caps.read().contains(cap)
    }

    fn send(&self, msg: Arc<Message>) -> Result<(), DeliveryError> {
        self.tx.try_send(msg)?;
        Ok(())
    }
}
