use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use viewcfg_engine::{DisplayStrategyRegistry, SharedConfig, TypeCatalog, validate};
use viewcfg_types::{TypeDescriptor, TypeIdentity, VisualConfig};

use crate::cache::ConfigurationCache;
use crate::options::VisualizerOptions;
use crate::{Error, Result};

/// File-system safe document name for a type
pub fn document_name(identity: &TypeIdentity) -> String {
    let stem: String = identity
        .full_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}.json", stem)
}

/// JSON documents on disk, one per type, kept in sync with the cache
#[derive(Debug)]
pub struct ConfigurationStore {
    folder: PathBuf,
    auto_save: bool,
    cache: Arc<ConfigurationCache>,
    registry: Arc<DisplayStrategyRegistry>,
    catalog: Arc<TypeCatalog>,
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ConfigurationStore {
    pub fn new(
        options: &VisualizerOptions,
        cache: Arc<ConfigurationCache>,
        registry: Arc<DisplayStrategyRegistry>,
        catalog: Arc<TypeCatalog>,
    ) -> Self {
        Self {
            folder: options.configuration_folder.clone(),
            auto_save: options.auto_save,
            cache,
            registry,
            catalog,
            write_locks: DashMap::new(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_for(&self, identity: &TypeIdentity) -> PathBuf {
        self.folder.join(document_name(identity))
    }

    fn write_lock(&self, identity: &TypeIdentity) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(identity.cache_key())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Cached config, else the stored document, else fresh defaults.
    ///
    /// Never fails: an unreadable or invalid document is logged and
    /// replaced by defaults.
    pub async fn load_or_create(&self, ty: &TypeDescriptor) -> SharedConfig {
        if let Some(cached) = self.cache.get(&ty.identity) {
            return cached;
        }
        if !self.catalog.contains(&ty.identity) {
            self.catalog.register(ty.clone());
        }

        let path = self.path_for(&ty.identity);
        match self.read_stored(&path, &ty.identity).await {
            Ok(Some(config)) => {
                tracing::debug!(type_name = %ty.identity, path = %path.display(), "loaded config");
                return self.cache.get_or_add(config);
            }
            Ok(None) => {
                tracing::debug!(type_name = %ty.identity, "no stored config, using defaults");
            }
            Err(err) => {
                tracing::warn!(
                    type_name = %ty.identity,
                    path = %path.display(),
                    error = %err,
                    "failed to load config, using defaults"
                );
            }
        }

        let config = self.registry.create_default_config(ty);
        if self.auto_save
            && let Err(err) = self.write_document(&config).await
        {
            tracing::warn!(type_name = %ty.identity, error = %err, "failed to save default config");
        }
        self.cache.get_or_add(config)
    }

    async fn read_stored(&self, path: &Path, identity: &TypeIdentity) -> Result<Option<VisualConfig>> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(None);
        }
        let mut config = self.read_document(path).await?;

        if &config.identity() != identity {
            return Err(Error::Config(format!(
                "{} holds {}, expected {}",
                path.display(),
                config.identity(),
                identity
            )));
        }
        validate(&config, &self.catalog)?;
        config.normalize();
        Ok(Some(config))
    }

    async fn read_document(&self, path: &Path) -> Result<VisualConfig> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| Error::serialization(path, e))
    }

    /// Serialize to `path` through a temporary file renamed into place
    async fn write_to(&self, config: &VisualConfig, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(config).map_err(|e| Error::serialization(path, e))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Write (when `write` is set) and cache `config` under its type's lock,
    /// so the cached state always matches the last document written
    async fn commit(&self, config: VisualConfig, write: bool) -> Result<SharedConfig> {
        let identity = config.identity();
        let lock = self.write_lock(&identity);
        let _guard = lock.lock().await;
        if write {
            self.write_to(&config, &self.path_for(&identity)).await?;
        }
        Ok(self.sync_cache(config))
    }

    async fn write_document(&self, config: &VisualConfig) -> Result<()> {
        let identity = config.identity();
        let lock = self.write_lock(&identity);
        let _guard = lock.lock().await;
        self.write_to(config, &self.path_for(&identity)).await
    }

    /// Put `config` into the cache. If another instance is already cached
    /// its contents are replaced, so existing handles see the new state.
    fn sync_cache(&self, config: VisualConfig) -> SharedConfig {
        let shared = self.cache.get_or_add(config.clone());
        {
            let mut cached = shared.write();
            if *cached != config {
                *cached = config;
            }
        }
        shared
    }

    /// Stamp, persist and cache a config
    pub async fn save(&self, mut config: VisualConfig) -> Result<SharedConfig> {
        config.touch();
        let identity = config.identity();
        let shared = self.commit(config, true).await?;
        tracing::info!(type_name = %identity, "saved config");
        Ok(shared)
    }

    /// Write a copy of `config` to an arbitrary location
    pub async fn export(&self, config: &VisualConfig, destination: &Path) -> Result<()> {
        self.write_to(config, destination).await?;
        tracing::info!(
            type_name = %config.identity(),
            destination = %destination.display(),
            "exported config"
        );
        Ok(())
    }

    /// Read and validate a document, then make it the cached config.
    /// On any failure the cache is left as it was.
    pub async fn import(&self, source: &Path) -> Result<SharedConfig> {
        let mut config = self.read_document(source).await?;
        validate(&config, &self.catalog)?;
        config.normalize();

        let identity = config.identity();
        let shared = self.commit(config, self.auto_save).await?;
        tracing::info!(
            type_name = %identity,
            source = %source.display(),
            "imported config"
        );
        Ok(shared)
    }

    /// Read a document without touching cache or store
    pub async fn read(&self, source: &Path) -> Result<VisualConfig> {
        self.read_document(source).await
    }
}
