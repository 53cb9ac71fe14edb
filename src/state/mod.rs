//! Session-side collaborators.
//!
//! The engines in this crate never own connections. They see sessions through
//! the [`Session`] and [`SessionRegistry`] traits, connect classes through
//! [`ConnectClass`] handles, and per-session integers through [`IntExtItem`].
//! The in-memory implementations here ([`LocalSession`], [`SessionTable`],
//! [`SessionInts`], [`ClassDirectory`]) are what the binary and tests run on.

mod class;
mod dashmap_ext;
mod ext;
mod registry;
mod session;

pub use class::{ClassDirectory, ClassId, ConnectClass};
pub use ext::{IntExtItem, SessionInts};
pub use registry::{SessionRegistry, SessionTable};
pub use session::{LocalSession, Session, SessionId};
pub(crate) use session::deliver;
