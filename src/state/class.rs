//! Connect classes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ClassBlock;

/// Stable identity of a connect class.
///
/// Ids are interned by class name, so a class keeps its id across rehashes
/// even when its settings (and therefore its [`ConnectClass`] value) change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connect class as seen by the engines.
///
/// Shared as `Arc<ConnectClass>`; a session keeps its class alive after the
/// class has been dropped from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectClass {
    /// Cache key.
    pub id: ClassId,
    /// Display name, for diagnostics.
    pub name: String,
    /// Channel limit, advertised per class as `CHANLIMIT`.
    pub max_channels: u32,
}

/// The configured classes plus the name → id interning table.
#[derive(Debug, Default)]
pub struct ClassDirectory {
    ids: HashMap<String, ClassId>,
    next_id: u32,
    classes: Vec<Arc<ConnectClass>>,
}

impl ClassDirectory {
    /// Create a directory from configuration blocks.
    pub fn new(blocks: &[ClassBlock]) -> Self {
        let mut directory = Self::default();
        directory.rehash(blocks);
        directory
    }

    /// Replace the configured class list.
    ///
    /// Names seen before keep their id. Classes missing from `blocks` are
    /// dropped from the list but their ids stay reserved, so a session still
    /// holding one can never collide with a new class.
    pub fn rehash(&mut self, blocks: &[ClassBlock]) {
        let classes = blocks
            .iter()
            .map(|block| {
                let id = self.intern(&block.name);
                Arc::new(ConnectClass {
                    id,
                    name: block.name.clone(),
                    max_channels: block.max_channels,
                })
            })
            .collect();
        self.classes = classes;
    }

    /// Configured classes, in configuration order.
    pub fn classes(&self) -> &[Arc<ConnectClass>] {
        &self.classes
    }

    /// Look up a configured class by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Arc<ConnectClass>> {
        self.classes
            .iter()
            .find(|class| class.name.eq_ignore_ascii_case(name))
    }

    fn intern(&mut self, name: &str) -> ClassId {
        let key = name.to_ascii_lowercase();
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        let id = ClassId(self.next_id);
        self.next_id += 1;
        self.ids.insert(key, id);
        id
    }
}
