//! Session enumeration.

use dashmap::DashMap;
use std::sync::Arc;

use super::dashmap_ext::DashMapExt;
use super::session::{Session, SessionId};

/// Enumerates the sessions connected to this server.
pub trait SessionRegistry: Send + Sync {
    /// Snapshot of every local session, registered or not.
    fn local_sessions(&self) -> Vec<Arc<dyn Session>>;
}

/// Concurrent session table keyed by [`SessionId`].
#[derive(Default)]
pub struct SessionTable {
    sessions: DashMap<SessionId, Arc<dyn Session>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session, replacing any entry with the same id.
    pub fn insert(&self, session: Arc<dyn Session>) {
        self.sessions.insert(session.id(), session);
    }

    pub fn remove(&self, id: &SessionId) -> Option<Arc<dyn Session>> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    pub fn get(&self, id: &SessionId) -> Option<Arc<dyn Session>> {
        self.sessions.get_cloned(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionRegistry for SessionTable {
    fn local_sessions(&self) -> Vec<Arc<dyn Session>> {
        self.sessions.values_cloned()
    }
}
