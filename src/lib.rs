//! slircd-clientproto - client-protocol extension layer for the Straylight
//! IRC daemon.
//!
//! Two engines driven synchronously by host events:
//!
//! - [`isupport::IsupportManager`] builds the `005` token set per connect
//!   class, caches it, and pushes only the differences to registered sessions
//!   when configuration or contributors change.
//! - [`batch::BatchManager`] frames IRCv3 batches, sending `BATCH +ref` lazily
//!   to each recipient and `BATCH -ref` to exactly those recipients.
//!
//! Sessions, classes, capability negotiation, and per-session storage are
//! reached through the traits in [`state`] and [`caps`].

pub mod batch;
pub mod caps;
pub mod config;
pub mod error;
pub mod isupport;
pub mod metrics;
pub mod state;
pub mod telemetry;
