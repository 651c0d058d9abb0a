//! Label → engine mapping used by the command-line entry point

use std::collections::BTreeMap;

/// Engines keyed by a caller-supplied label.
///
/// Entries are never removed; inserting under an existing label replaces the
/// previous engine. Not synchronized: share it across threads only behind
/// your own lock.
#[derive(Debug)]
pub struct EngineRegistry<E> {
    engines: BTreeMap<String, E>,
}

impl<E> Default for EngineRegistry<E> {
    fn default() -> Self {
        Self {
            engines: BTreeMap::new(),
        }
    }
}

impl<E> EngineRegistry<E> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `engine` under `label`, returning the engine it replaced.
    pub fn insert(&mut self, label: impl Into<String>, engine: E) -> Option<E> {
        self.engines.insert(label.into(), engine)
    }

    /// Look up the engine stored under `label`
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&E> {
        self.engines.get(label)
    }

    /// Whether `label` is registered
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.engines.contains_key(label)
    }

    /// Registered labels in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    /// Number of registered engines
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
