use crate::state::Session;

/// IRCv3 `batch` capability name.
pub const BATCH_CAP: &str = "batch";

/// Answers "has this session enabled the capability?".
pub trait CapabilityQuery: Send + Sync {
    fn is_enabled(&self, session: &dyn Session) -> bool;
}

/// Checks a named capability against the session's negotiated set.
#[derive(Debug, Clone)]
pub struct NegotiatedCap {
    name: String,
}

impl NegotiatedCap {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The `batch` capability.
    pub fn batch() -> Self {
        Self::new(BATCH_CAP)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CapabilityQuery for NegotiatedCap {
    #[inline]
    fn is_enabled(&self, session: &dyn Session) -> bool {
        session.has_cap(&self.name)
    }
}
