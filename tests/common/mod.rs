//! Integration test common infrastructure.
//!
//! In-memory sessions with drainable queues.

pub mod session;

#[allow(unused_imports)]
pub use session::{TestSession, drain};
