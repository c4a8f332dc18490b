use dashmap::DashMap;
use std::sync::Arc;
use viewcfg_engine::{DisplayStrategyRegistry, SharedConfig, share};
use viewcfg_types::{TypeDescriptor, TypeIdentity, VisualConfig};

/// Process-wide configs keyed by `"{full name}, {assembly}"`.
///
/// Each key maps to exactly one shared instance for the cache's lifetime
/// (until removed or cleared); concurrent callers always converge on it.
#[derive(Debug)]
pub struct ConfigurationCache {
    configs: DashMap<String, SharedConfig>,
    registry: Arc<DisplayStrategyRegistry>,
}

impl ConfigurationCache {
    pub fn new(registry: Arc<DisplayStrategyRegistry>) -> Self {
        Self {
            configs: DashMap::new(),
            registry,
        }
    }

    /// Cached config for the type, built from defaults on first request
    pub fn get_or_create_config(&self, ty: &TypeDescriptor) -> SharedConfig {
        self.configs
            .entry(ty.identity.cache_key())
            .or_insert_with(|| {
                tracing::debug!(type_name = %ty.identity, "caching default config");
                share(self.registry.create_default_config(ty))
            })
            .clone()
    }

    /// Install `config` unless the type already has an entry.
    /// Either way the returned handle is the one every caller shares.
    pub fn get_or_add(&self, config: VisualConfig) -> SharedConfig {
        self.configs
            .entry(config.identity().cache_key())
            .or_insert_with(|| share(config))
            .clone()
    }

    pub fn get(&self, identity: &TypeIdentity) -> Option<SharedConfig> {
        self.configs
            .get(&identity.cache_key())
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.configs.contains_key(&identity.cache_key())
    }

    pub fn remove(&self, identity: &TypeIdentity) -> Option<SharedConfig> {
        self.configs
            .remove(&identity.cache_key())
            .map(|(_, config)| config)
    }

    /// Drop every entry; handles already given out stay valid but detached
    pub fn clear(&self) {
        let count = self.configs.len();
        self.configs.clear();
        tracing::debug!(count, "configuration cache cleared");
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Cache keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.configs.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}
