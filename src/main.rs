//! slircd-clientproto - prints the ISUPPORT burst each connect class would
//! receive under a configuration.

use futures_util::SinkExt;
use slirc_wire::IrcCodec;
use slircd_clientproto::config::{Config, validate};
use slircd_clientproto::isupport::IsupportManager;
use slircd_clientproto::metrics;
use slircd_clientproto::state::{ClassDirectory, LocalSession, SessionTable};
use std::sync::Arc;
use tokio_util::codec::FramedWrite;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the wire lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        network = %config.server.network,
        classes = config.classes.len(),
        "Loaded configuration"
    );

    metrics::init();

    let directory = ClassDirectory::new(&config.classes);
    let sessions = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &sessions);

    let mut out = FramedWrite::new(tokio::io::stdout(), IrcCodec::new());
    for class in directory.classes() {
        let lines = isupport.lines_for(class.id).map_or(0, <[_]>::len);
        info!(class = %class.name, lines, "Advertising");

        let (session, mut rx) = LocalSession::new("*", Arc::clone(class), lines);
        isupport.send_to(session.as_ref());
        drop(session);

        while let Some(msg) = rx.recv().await {
            out.send(msg).await?;
        }
    }

    Ok(())
}
