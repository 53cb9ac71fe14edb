//! Per-class token cache and rebuild broadcaster.

use std::collections::HashMap;
use std::sync::Arc;

use slirc_wire::isupport::{build_numerics, difference, NumericLine, TokenMap};
use tracing::{debug, info, warn};

use super::base::CoreTokens;
use super::contributors::{ChannelTokens, IsupportContributor, MonitorTokens};
use crate::config::Config;
use crate::state::{ClassDirectory, ClassId, ConnectClass, Session, SessionRegistry};
use crate::telemetry::{spans, RebuildTimer};

/// Snapshot of one class as of the last completed build.
#[derive(Debug, Clone)]
struct CachedClass {
    name: String,
    tokens: TokenMap,
    lines: Vec<NumericLine>,
}

/// Builds, caches, and incrementally pushes ISUPPORT tokens.
///
/// One instance per server, owned by the host. Every operation runs to
/// completion without suspending, so readers see either the cache before a
/// build or the cache after it.
pub struct IsupportManager {
    server_name: String,
    core: CoreTokens,
    contributors: Vec<Arc<dyn IsupportContributor>>,
    cache: HashMap<ClassId, CachedClass>,
}

impl IsupportManager {
    /// Create an engine with the core token set and no contributors.
    pub fn new(config: &Config) -> Self {
        Self {
            server_name: config.server.name.clone(),
            core: CoreTokens::from_config(config),
            contributors: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Create an engine with the built-in `channels` and `monitor`
    /// contributors registered, in that order.
    pub fn with_defaults(config: &Config) -> Self {
        let mut manager = Self::new(config);
        manager.register(Arc::new(ChannelTokens::from_config(config)));
        manager.register(Arc::new(MonitorTokens::from_config(config)));
        manager
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Register a contributor.
    ///
    /// A contributor with the same name is replaced where it stands, keeping
    /// the run order of everything else. Takes effect on the next build.
    pub fn register(&mut self, contributor: Arc<dyn IsupportContributor>) {
        let name = contributor.name().to_string();
        match self.contributors.iter().position(|c| c.name() == name) {
            Some(index) => {
                debug!(contributor = %name, "Replaced ISUPPORT contributor");
                self.contributors[index] = contributor;
            }
            None => {
                debug!(contributor = %name, "Registered ISUPPORT contributor");
                self.contributors.push(contributor);
            }
        }
    }

    /// Remove a contributor by name. Returns whether one was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.contributors.len();
        self.contributors.retain(|c| c.name() != name);
        let removed = self.contributors.len() != before;
        if removed {
            debug!(contributor = %name, "Unregistered ISUPPORT contributor");
        }
        removed
    }

    /// Contributor names in run order.
    pub fn contributors(&self) -> Vec<&str> {
        self.contributors.iter().map(|c| c.name()).collect()
    }

    /// Take new configuration without rebuilding.
    ///
    /// Built-in contributors that are still registered pick up their new
    /// limits; ones that were unregistered stay gone.
    pub fn apply_config(&mut self, config: &Config) {
        self.server_name = config.server.name.clone();
        self.core = CoreTokens::from_config(config);
        self.refresh(Arc::new(ChannelTokens::from_config(config)));
        self.refresh(Arc::new(MonitorTokens::from_config(config)));
    }

    /// Reload: update the class directory and engine from `config`, then
    /// build and push the differences.
    pub fn rehash(
        &mut self,
        config: &Config,
        directory: &mut ClassDirectory,
        registry: &dyn SessionRegistry,
    ) {
        directory.rehash(&config.classes);
        self.apply_config(config);
        self.build(directory.classes(), registry);
    }

    fn refresh(&mut self, contributor: Arc<dyn IsupportContributor>) {
        if let Some(slot) = self
            .contributors
            .iter_mut()
            .find(|c| c.name() == contributor.name())
        {
            *slot = contributor;
        }
    }

    /// Recompute every class's tokens and push differences.
    ///
    /// All differences are taken against the previous cache before it is
    /// replaced. A class seen for the first time gets a snapshot but sends
    /// nothing. A registered session whose class is no longer configured has
    /// that class rebuilt on the spot, so it still hears about changes.
    /// Unregistered sessions receive nothing.
    pub fn build(&mut self, classes: &[Arc<ConnectClass>], registry: &dyn SessionRegistry) {
        let _span = spans::rebuild(classes.len()).entered();
        let _timer = RebuildTimer::new();

        let global = self.global_tokens();
        let mut next: HashMap<ClassId, CachedClass> = HashMap::with_capacity(classes.len());
        let mut diffs: HashMap<ClassId, Vec<NumericLine>> = HashMap::new();

        for class in classes {
            let state = self.class_state(&global, class);
            if let Some(lines) = self.diff_lines(class.id, &state) {
                diffs.insert(class.id, lines);
            }
            next.insert(class.id, state);
        }

        let mut notified = 0usize;
        for session in registry.local_sessions() {
            if !session.is_registered() {
                continue;
            }

            let class = session.class();
            if !next.contains_key(&class.id) {
                debug!(class = %class.name, "Building tokens for unconfigured class");
                let state = self.class_state(&global, &class);
                if let Some(lines) = self.diff_lines(class.id, &state) {
                    diffs.insert(class.id, lines);
                }
                next.insert(class.id, state);
            }

            if let Some(lines) = diffs.get(&class.id) {
                self.send_lines(session.as_ref(), lines, "diff");
                notified += 1;
            }
        }

        self.cache = next;
        info!(
            classes = self.cache.len(),
            changed = diffs.len(),
            notified,
            "Rebuilt ISUPPORT"
        );
    }

    /// Move a session's view from one class to another.
    ///
    /// Sends the difference between the two cached sets. Nothing is sent if
    /// either class has no snapshot.
    pub fn change_class(&self, session: &dyn Session, old: ClassId, new: ClassId) {
        let (Some(from), Some(to)) = (self.cache.get(&old), self.cache.get(&new)) else {
            debug!(session = %session.id(), %old, %new, "Class change without cached tokens");
            return;
        };

        let lines = build_numerics(&difference(&from.tokens, &to.tokens));
        debug!(
            session = %session.id(),
            from = %from.name,
            to = %to.name,
            lines = lines.len(),
            "Sending ISUPPORT class change"
        );
        self.send_lines(session, &lines, "diff");
    }

    /// Send the full cached set for the session's current class.
    pub fn send_to(&self, session: &dyn Session) {
        let class = session.class();
        match self.cache.get(&class.id) {
            Some(state) => self.send_lines(session, &state.lines, "full"),
            None => debug!(session = %session.id(), class = %class.name, "No cached ISUPPORT"),
        }
    }

    /// Cached tokens for a class.
    pub fn tokens_for(&self, class: ClassId) -> Option<&TokenMap> {
        self.cache.get(&class).map(|state| &state.tokens)
    }

    /// Cached lines for a class.
    pub fn lines_for(&self, class: ClassId) -> Option<&[NumericLine]> {
        self.cache.get(&class).map(|state| state.lines.as_slice())
    }

    /// Classes with a snapshot, in id order.
    pub fn cached_classes(&self) -> Vec<ClassId> {
        let mut ids: Vec<_> = self.cache.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn global_tokens(&self) -> TokenMap {
        let mut tokens = self.core.to_map();
        for contributor in &self.contributors {
            contributor.on_build_isupport(&mut tokens);
        }
        tokens
    }

    fn class_state(&self, global: &TokenMap, class: &ConnectClass) -> CachedClass {
        let mut tokens = global.clone();
        for contributor in &self.contributors {
            contributor.on_build_class_isupport(class, &mut tokens);
        }

        tokens.retain(|name, _| match name.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(class = %class.name, error = %e, "Dropping invalid ISUPPORT token");
                false
            }
        });

        let lines = build_numerics(&tokens);
        CachedClass {
            name: class.name.clone(),
            tokens,
            lines,
        }
    }

    /// Packed difference from the cached snapshot, if there is one and it
    /// changed.
    fn diff_lines(&self, class: ClassId, state: &CachedClass) -> Option<Vec<NumericLine>> {
        let old = self.cache.get(&class)?;
        let diff = difference(&old.tokens, &state.tokens);
        if diff.is_empty() {
            return None;
        }
        Some(build_numerics(&diff))
    }

    fn send_lines(&self, session: &dyn Session, lines: &[NumericLine], kind: &str) {
        if lines.is_empty() {
            return;
        }
        let nick = session.nick();
        for line in lines {
            crate::state::deliver(session, Arc::new(line.to_message(&self.server_name, &nick)));
        }
        crate::metrics::record_isupport_lines(kind, lines.len());
    }
}
