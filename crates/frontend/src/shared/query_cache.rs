//! Client-side query cache.
//!
//! Holds one version counter per [`QueryKey`] and one per key root. Loaders
//! read [`QueryCache::version`] inside an effect, so bumping a counter with
//! [`QueryCache::invalidate`] refetches every mounted reader of that key.

use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Copy)]
pub struct QueryCache {
    exact: RwSignal<HashMap<String, u64>>,
    roots: RwSignal<HashMap<&'static str, u64>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            exact: RwSignal::new(HashMap::new()),
            roots: RwSignal::new(HashMap::new()),
        }
    }

    /// Tracked read: an effect calling this reruns when `key` is invalidated.
    pub fn version(&self, key: &QueryKey) -> u64 {
        let exact = self
            .exact
            .with(|m| m.get(&key.to_string()).copied().unwrap_or(0));
        let root = self
            .roots
            .with(|m| m.get(key.root()).copied().unwrap_or(0));
        exact + root
    }

    pub fn invalidate(&self, key: &QueryKey) {
        log::debug!("invalidate {}", key);
        self.exact.update(|m| {
            *m.entry(key.to_string()).or_insert(0) += 1;
        });
    }

    /// Every key sharing `key`'s root, whatever its parameter.
    pub fn invalidate_root(&self, key: &QueryKey) {
        log::debug!("invalidate root {}", key.root());
        self.roots.update(|m| {
            *m.entry(key.root()).or_insert(0) += 1;
        });
    }

    pub fn invalidate_all(&self, keys: &[QueryKey]) {
        for key in keys {
            self.invalidate(key);
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache not provided in context")
}
