use std::path::Path;
use std::sync::Arc;

use viewcfg_engine::{
    DisplayStrategyRegistry, EditSession, LocalZone, PropertyNode, SharedConfig, TypeCatalog,
    TypeDisplayStrategy, ValueCache, ValueFormatterRegistry, build_property_tree, validate,
};
use viewcfg_runtime::{ConfigurationCache, ConfigurationStore, VisualizerOptions};
use viewcfg_types::{TypeDescriptor, TypeDisplayConfig, TypeIdentity, Value, VisualConfig};

use crate::error::{Error, Result};

/// Assembles a [`Client`] from options plus optional catalog and clock
#[derive(Debug, Default)]
pub struct ClientBuilder {
    options: VisualizerOptions,
    catalog: Option<TypeCatalog>,
    zone: Option<LocalZone>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: VisualizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Start from this catalog instead of the built-in types only
    pub fn catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn local_zone(mut self, zone: LocalZone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn build(self) -> Client {
        let options = self.options;
        let catalog = Arc::new(self.catalog.unwrap_or_default());
        let registry = Arc::new(DisplayStrategyRegistry::with_date_format(&options.default_date_format));
        let cache = Arc::new(ConfigurationCache::new(registry.clone()));
        let store = ConfigurationStore::new(&options, cache.clone(), registry.clone(), catalog.clone());

        let value_cache = Arc::new(ValueCache::new(options.max_cache_items, options.cache_ttl()));
        let mut formatters = ValueFormatterRegistry::new()
            .with_catalog(catalog.clone())
            .with_value_cache(value_cache);
        if let Some(zone) = self.zone {
            formatters = formatters.with_local_zone(zone);
        }

        tracing::debug!(folder = %options.configuration_folder.display(), "viewcfg client ready");
        Client {
            options,
            catalog,
            registry,
            cache,
            store,
            formatters,
        }
    }
}

/// Entry point for hosts: configs, formatting and editing behind one handle
#[derive(Debug)]
pub struct Client {
    options: VisualizerOptions,
    catalog: Arc<TypeCatalog>,
    registry: Arc<DisplayStrategyRegistry>,
    cache: Arc<ConfigurationCache>,
    store: ConfigurationStore,
    formatters: ValueFormatterRegistry,
}

impl Client {
    pub fn new(options: VisualizerOptions) -> Self {
        ClientBuilder::new().options(options).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Options from the user's config directory, with environment overrides
    pub fn from_default_options() -> Result<Self> {
        Ok(Self::new(VisualizerOptions::load()?))
    }

    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn register_type(&self, ty: TypeDescriptor) {
        self.catalog.register(ty);
    }

    pub fn resolve_type(&self, identity: &TypeIdentity) -> Result<TypeDescriptor> {
        self.catalog
            .resolve(identity)
            .ok_or_else(|| Error::NotFound(format!("type {}", identity)))
    }

    pub fn get_strategy(&self, ty: &TypeDescriptor) -> Arc<dyn TypeDisplayStrategy> {
        self.registry.get_strategy(ty)
    }

    /// Derived defaults, detached from cache and store
    pub fn default_config(&self, ty: &TypeDescriptor) -> VisualConfig {
        self.registry.create_default_config(ty)
    }

    // ------------------------------------------------------------------
    // Configurations
    // ------------------------------------------------------------------

    /// Shared config for the type: cached, stored, or freshly derived
    pub async fn get_or_create_config(&self, ty: &TypeDescriptor) -> SharedConfig {
        self.store.load_or_create(ty).await
    }

    /// Same as [`get_or_create_config`](Self::get_or_create_config) for a type
    /// already in the catalog
    pub async fn config_for(&self, identity: &TypeIdentity) -> Result<SharedConfig> {
        let ty = self.resolve_type(identity)?;
        Ok(self.get_or_create_config(&ty).await)
    }

    pub async fn save_config(&self, config: &SharedConfig) -> Result<SharedConfig> {
        let snapshot = config.read().clone();
        Ok(self.store.save(snapshot).await?)
    }

    pub async fn export_config(&self, config: &SharedConfig, destination: &Path) -> Result<()> {
        let snapshot = config.read().clone();
        Ok(self.store.export(&snapshot, destination).await?)
    }

    pub async fn import_config(&self, source: &Path) -> Result<SharedConfig> {
        Ok(self.store.import(source).await?)
    }

    /// Read a document and check it against the catalog without caching it
    pub async fn check_document(&self, source: &Path) -> Result<VisualConfig> {
        let config = self.store.read(source).await?;
        validate(&config, &self.catalog)?;
        Ok(config)
    }

    /// Replace the config's contents with freshly derived defaults
    pub fn reset_to_defaults(&self, config: &SharedConfig) -> Result<()> {
        let identity = config.read().identity();
        let ty = self.resolve_type(&identity)?;
        let defaults = self.registry.create_default_config(&ty);
        *config.write() = defaults;
        tracing::info!(type_name = %identity, "config reset to defaults");
        Ok(())
    }

    /// Add nested entries under a complex property, returning how many
    pub fn expand_property(&self, config: &SharedConfig, path: &str) -> Result<usize> {
        let identity = config.read().identity();
        let ty = self.resolve_type(&identity)?;
        let mut config = config.write();
        let added = self.registry.expand_property(&mut config, &ty, path)?;
        if added > 0 {
            config.touch();
        }
        Ok(added)
    }

    pub fn property_tree(&self, config: &SharedConfig) -> Vec<PropertyNode> {
        build_property_tree(&config.read())
    }

    pub fn edit(&self, config: SharedConfig) -> EditSession {
        EditSession::new(config)
    }

    /// Drop cached configs and rendered values
    pub fn clear_cache(&self) {
        self.cache.clear();
        if let Some(values) = self.formatters.value_cache() {
            values.clear();
        }
    }

    pub fn cached_types(&self) -> Vec<String> {
        self.cache.keys()
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    pub fn formatters(&self) -> &ValueFormatterRegistry {
        &self.formatters
    }

    pub fn format(&self, value: &Value, config: &TypeDisplayConfig) -> String {
        self.formatters.format(value, config)
    }

    pub fn try_format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String> {
        Ok(self.formatters.try_format(value, config)?)
    }

    pub fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value> {
        Ok(self.formatters.parse(text, config)?)
    }

    /// Format the value found at `path` inside `item` using that property's
    /// settings. `None` when the config has no entry for the path; a missing
    /// value renders as empty text.
    pub fn format_field(&self, item: &Value, config: &VisualConfig, path: &str) -> Option<String> {
        let property = config.property(path)?;
        let value = item.lookup(path).unwrap_or(&Value::Null);
        Some(self.format(value, &property.type_config))
    }

    /// Evict expired and excess rendered values
    pub fn sweep_value_cache(&self) -> usize {
        self.formatters.value_cache().map(|c| c.sweep()).unwrap_or(0)
    }
}
