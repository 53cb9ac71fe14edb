//! Rebuild behaviour of the ISUPPORT engine against live sessions.

use slirc_wire::TokenMap;
use slircd_clientproto::config::{ClassBlock, Config};
use slircd_clientproto::isupport::{IsupportContributor, IsupportManager};
use slircd_clientproto::state::{ClassDirectory, ClassId, ConnectClass, SessionTable};
use std::sync::Arc;

mod common;
use common::TestSession;

const TRAILER: &str = ":are supported by this server\r\n";

fn config_with_classes(network: &str, classes: &[(&str, u32)]) -> Config {
    let mut config = Config::default();
    config.server.name = "irc.test".into();
    config.server.network = network.into();
    config.classes = classes
        .iter()
        .map(|(name, max_channels)| ClassBlock {
            name: (*name).to_string(),
            max_channels: *max_channels,
        })
        .collect();
    config
}

struct Many(usize);

impl IsupportContributor for Many {
    fn name(&self) -> &str {
        "many"
    }

    fn on_build_isupport(&self, tokens: &mut TokenMap) {
        for i in 0..self.0 {
            tokens.insert(format!("ZZTOKEN{i:02}"), i.to_string());
        }
    }
}

struct Escaped;

impl IsupportContributor for Escaped {
    fn name(&self) -> &str {
        "escaped"
    }

    fn on_build_isupport(&self, tokens: &mut TokenMap) {
        tokens.insert("XVALUE", "a b=c\\");
    }
}

#[test]
fn network_change_reaches_every_configured_class() {
    let mut config = config_with_classes("Foo", &[("a", 20), ("b", 20)]);
    let mut directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);

    let mut alice = TestSession::registered("alice", &directory.classes()[0]);
    let mut bob = TestSession::registered("bob", &directory.classes()[1]);
    table.insert(alice.dyn_session());
    table.insert(bob.dyn_session());

    // Class c first appears in this rebuild, so it has nothing to diff against.
    config = config_with_classes("Bar", &[("a", 20), ("b", 20), ("c", 20)]);
    directory.rehash(&config.classes);
    let mut carol = TestSession::registered("carol", &directory.classes()[2]);
    table.insert(carol.dyn_session());

    isupport.apply_config(&config);
    isupport.build(directory.classes(), &table);

    assert_eq!(
        alice.drain(),
        vec![format!(":irc.test 005 alice NETWORK=Bar {TRAILER}")]
    );
    assert_eq!(
        bob.drain(),
        vec![format!(":irc.test 005 bob NETWORK=Bar {TRAILER}")]
    );
    assert!(carol.drain().is_empty());
    assert_eq!(
        isupport.cached_classes(),
        vec![ClassId(0), ClassId(1), ClassId(2)]
    );
}

#[test]
fn unchanged_rebuild_sends_nothing() {
    let config = config_with_classes("Foo", &[("a", 20)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut alice = TestSession::registered("alice", &directory.classes()[0]);
    table.insert(alice.dyn_session());

    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);
    isupport.build(directory.classes(), &table);

    assert!(alice.drain().is_empty());
}

#[test]
fn unregistered_sessions_are_skipped() {
    let mut config = config_with_classes("Foo", &[("a", 20)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut pending = TestSession::unregistered("pending", &directory.classes()[0]);
    table.insert(pending.dyn_session());

    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);
    config.server.network = "Bar".into();
    isupport.apply_config(&config);
    isupport.build(directory.classes(), &table);

    assert!(pending.drain().is_empty());

    // Once registered, the host sends the full burst, which is already current.
    pending.session.set_registered(true);
    isupport.send_to(pending.session.as_ref());
    let burst = pending.drain();
    assert!(burst.iter().any(|line| line.contains(" NETWORK=Bar ")));
}

#[test]
fn removed_class_is_rebuilt_for_its_sessions() {
    let mut config = config_with_classes("Foo", &[("a", 20), ("b", 35)]);
    let mut directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);

    let mut bob = TestSession::registered("bob", &directory.classes()[1]);
    table.insert(bob.dyn_session());

    config = config_with_classes("Bar", &[("a", 20)]);
    isupport.rehash(&config, &mut directory, &table);

    assert_eq!(
        bob.drain(),
        vec![format!(":irc.test 005 bob NETWORK=Bar {TRAILER}")]
    );
    assert_eq!(isupport.cached_classes(), vec![ClassId(0), ClassId(1)]);
    let tokens = isupport.tokens_for(ClassId(1)).unwrap();
    assert_eq!(tokens.get("CHANLIMIT").map(|v| &v[..]), Some(&b"#:35"[..]));
}

#[test]
fn class_without_any_snapshot_gets_nothing() {
    let mut config = config_with_classes("Foo", &[("a", 20)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);

    let orphan = Arc::new(ConnectClass {
        id: ClassId(42),
        name: "orphan".into(),
        max_channels: 5,
    });
    let mut dave = TestSession::registered("dave", &orphan);
    table.insert(dave.dyn_session());

    config.server.network = "Bar".into();
    isupport.apply_config(&config);
    isupport.build(directory.classes(), &table);

    assert!(dave.drain().is_empty());
    assert!(isupport.cached_classes().contains(&ClassId(42)));
}

#[test]
fn change_class_sends_only_the_difference() {
    let config = config_with_classes("Foo", &[("users", 20), ("opers", 50)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);

    let users = &directory.classes()[0];
    let opers = &directory.classes()[1];
    let mut alice = TestSession::registered("alice", users);

    let old = alice.session.set_class(Arc::clone(opers));
    isupport.change_class(alice.session.as_ref(), old.id, opers.id);
    assert_eq!(
        alice.drain(),
        vec![format!(":irc.test 005 alice CHANLIMIT=#:50 {TRAILER}")]
    );

    // Unknown class on either side: nothing.
    isupport.change_class(alice.session.as_ref(), opers.id, ClassId(7));
    assert!(alice.drain().is_empty());
    isupport.change_class(alice.session.as_ref(), ClassId(7), opers.id);
    assert!(alice.drain().is_empty());
}

#[test]
fn large_diffs_are_packed_twelve_per_line() {
    let config = config_with_classes("Foo", &[("a", 20)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut alice = TestSession::registered("alice", &directory.classes()[0]);
    table.insert(alice.dyn_session());

    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.build(directory.classes(), &table);
    isupport.register(Arc::new(Many(30)));
    isupport.build(directory.classes(), &table);

    let lines = alice.drain();
    assert_eq!(lines.len(), 3);
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| line.split(' ').filter(|p| p.starts_with("ZZTOKEN")).count())
        .collect();
    assert_eq!(counts, vec![12, 12, 6]);
    assert!(lines[0].contains(" ZZTOKEN00=0 ZZTOKEN01=1 "));

    // Unloading the contributor removes every token it added.
    isupport.unregister("many");
    isupport.build(directory.classes(), &table);
    let lines = alice.drain();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" -ZZTOKEN00 "));
}

#[test]
fn values_are_escaped_on_the_wire() {
    let config = config_with_classes("Foo", &[("a", 20)]);
    let directory = ClassDirectory::new(&config.classes);
    let table = SessionTable::new();
    let mut isupport = IsupportManager::with_defaults(&config);
    isupport.register(Arc::new(Escaped));
    isupport.build(directory.classes(), &table);

    let mut alice = TestSession::registered("alice", &directory.classes()[0]);
    isupport.send_to(alice.session.as_ref());
    let burst = alice.drain().concat();
    assert!(burst.contains(" XVALUE=a\\x20b\\x3Dc\\x5C "));
}
