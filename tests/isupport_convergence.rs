//! A client that applies every pushed 005 line ends up with the cached set.

use proptest::prelude::*;
use slirc_wire::isupport::unescape_value;
use slirc_wire::{IrcEncode, Message, TokenMap};
use slircd_clientproto::config::Config;
use slircd_clientproto::isupport::{IsupportContributor, IsupportManager};
use slircd_clientproto::state::{ClassDirectory, SessionTable};
use std::collections::BTreeMap;
use std::sync::Arc;

mod common;
use common::TestSession;

struct Fixed(BTreeMap<String, Vec<u8>>);

impl IsupportContributor for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn on_build_isupport(&self, tokens: &mut TokenMap) {
        for (name, value) in &self.0 {
            tokens.insert(name.clone(), value.clone());
        }
    }
}

/// Apply the token parameters of one 005 line, as a client would.
fn apply_line(seen: &mut TokenMap, msg: &Message) {
    let raw = msg.to_bytes();
    let params = raw
        .split(|b| *b == b' ')
        .skip(3)
        .take_while(|param| !param.starts_with(b":"));

    for param in params {
        if let Some(name) = param.strip_prefix(b"-") {
            seen.remove(&String::from_utf8_lossy(name));
            continue;
        }
        let (name, value) = match param.iter().position(|b| *b == b'=') {
            Some(eq) => (&param[..eq], unescape_value(&param[eq + 1..])),
            None => (param, Vec::new()),
        };
        seen.insert(String::from_utf8_lossy(name).into_owned(), value);
    }
}

fn token_sets() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map("[A-Z]{1,8}", prop::collection::vec(any::<u8>(), 0..12), 0..20)
}

proptest! {
    #[test]
    fn pushed_diffs_converge_on_cache(before in token_sets(), after in token_sets()) {
        let config = Config::default();
        let directory = ClassDirectory::new(&config.classes);
        let class = Arc::clone(&directory.classes()[0]);
        let table = SessionTable::new();

        let mut isupport = IsupportManager::with_defaults(&config);
        isupport.register(Arc::new(Fixed(before)));
        isupport.build(directory.classes(), &table);

        let mut alice = TestSession::registered("alice", &class);
        table.insert(alice.dyn_session());
        isupport.send_to(alice.session.as_ref());

        isupport.register(Arc::new(Fixed(after)));
        isupport.build(directory.classes(), &table);

        let mut seen = TokenMap::new();
        while let Ok(msg) = alice.rx.try_recv() {
            prop_assert!(msg.numeric_params().is_some_and(|(_, params)| params.len() <= 14));
            apply_line(&mut seen, &msg);
        }
        prop_assert_eq!(Some(&seen), isupport.tokens_for(class.id));
    }
}
