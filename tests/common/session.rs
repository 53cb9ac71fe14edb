//! Test sessions.

use slirc_wire::Message;
use slircd_clientproto::state::{ConnectClass, LocalSession, Session};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A [`LocalSession`] plus the receiving end of its queue.
pub struct TestSession {
    pub session: Arc<LocalSession>,
    pub rx: mpsc::Receiver<Arc<Message>>,
}

#[allow(dead_code)]
impl TestSession {
    /// A registered session in `class`.
    pub fn registered(nick: &str, class: &Arc<ConnectClass>) -> Self {
        let test = Self::unregistered(nick, class);
        test.session.set_registered(true);
        test
    }

    /// A session still in the handshake.
    pub fn unregistered(nick: &str, class: &Arc<ConnectClass>) -> Self {
        let (session, rx) = LocalSession::new(nick, Arc::clone(class), 1024);
        Self { session, rx }
    }

    /// A registered session with the `batch` capability.
    pub fn with_batch(nick: &str, class: &Arc<ConnectClass>) -> Self {
        let test = Self::registered(nick, class);
        test.session.enable_cap("batch");
        test
    }

    /// The session as the engines see it.
    pub fn dyn_session(&self) -> Arc<dyn Session> {
        self.session.clone()
    }

    /// Everything queued so far, rendered as wire lines.
    pub fn drain(&mut self) -> Vec<String> {
        drain(&mut self.rx)
    }
}

/// Render every queued message.
pub fn drain(rx: &mut mpsc::Receiver<Arc<Message>>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg.to_string());
    }
    out
}
