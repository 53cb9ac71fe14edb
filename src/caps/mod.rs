//! Capability-negotiation queries.
//!
//! The batch framer only needs to know whether a session has negotiated one
//! IRCv3 capability. How CAP LS/REQ/ACK works is somebody else's problem; this
//! module reduces it to [`CapabilityQuery::is_enabled`].

mod query;

pub use query::{BATCH_CAP, CapabilityQuery, NegotiatedCap};
