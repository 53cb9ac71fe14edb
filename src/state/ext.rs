//! Per-session integer storage.

use dashmap::DashMap;

use super::dashmap_ext::DashMapExt;
use super::session::{Session, SessionId};

/// An integer slot attached to every session.
///
/// Unset reads as zero.
pub trait IntExtItem: Send + Sync {
    fn get(&self, session: &dyn Session) -> u64;
    fn set(&self, session: &dyn Session, value: u64);
    fn unset(&self, session: &dyn Session);
}

/// [`IntExtItem`] backed by a concurrent map.
///
/// Zero is never stored; setting zero unsets.
#[derive(Debug)]
pub struct SessionInts {
    name: &'static str,
    values: DashMap<SessionId, u64>,
}

impl SessionInts {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            values: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sessions with a non-zero value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IntExtItem for SessionInts {
    fn get(&self, session: &dyn Session) -> u64 {
        self.values.get_cloned(&session.id()).unwrap_or(0)
    }

    fn set(&self, session: &dyn Session, value: u64) {
        if value == 0 {
            self.values.remove(&session.id());
        } else {
            self.values.insert(session.id(), value);
        }
    }

    fn unset(&self, session: &dyn Session) {
        self.values.remove(&session.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClassId, ConnectClass, LocalSession};
    use std::sync::Arc;

    #[test]
    fn zero_is_unset() {
        let class = Arc::new(ConnectClass {
            id: ClassId(0),
            name: "main".into(),
            max_channels: 20,
        });
        let (session, _rx) = LocalSession::new("alice", class, 4);
        let ints = SessionInts::new("batchbits");

        assert_eq!(ints.get(session.as_ref()), 0);
        ints.set(session.as_ref(), 0b101);
        assert_eq!(ints.get(session.as_ref()), 0b101);
        assert_eq!(ints.len(), 1);

        ints.set(session.as_ref(), 0);
        assert!(ints.is_empty());

        ints.set(session.as_ref(), 7);
        ints.unset(session.as_ref());
        assert_eq!(ints.get(session.as_ref()), 0);
    }
}
