// Store and cache working together against a temporary configuration folder
use std::sync::Arc;
use tempfile::TempDir;
use viewcfg_engine::{DisplayStrategyRegistry, TypeCatalog, ValidationError};
use viewcfg_runtime::{ConfigurationCache, ConfigurationStore, Error, VisualizerOptions};
use viewcfg_types::{DisplayMode, TypeDescriptor, TypeIdentity, builtin};

struct Fixture {
    dir: TempDir,
    cache: Arc<ConfigurationCache>,
    catalog: Arc<TypeCatalog>,
    store: ConfigurationStore,
}

fn fixture(auto_save: bool) -> Fixture {
    let dir = TempDir::new().unwrap();
    let options = VisualizerOptions {
        auto_save,
        ..VisualizerOptions::default()
    }
    .with_configuration_folder(dir.path().join("Configs"));

    let registry = Arc::new(DisplayStrategyRegistry::new());
    let cache = Arc::new(ConfigurationCache::new(registry.clone()));
    let catalog = Arc::new(TypeCatalog::new());
    let store = ConfigurationStore::new(&options, cache.clone(), registry, catalog.clone());
    Fixture {
        dir,
        cache,
        catalog,
        store,
    }
}

fn person() -> TypeDescriptor {
    TypeDescriptor::object("Crm.Person", "crm")
        .with_property("Name", builtin::string())
        .with_property("Age", builtin::i32())
        .with_property("Created", builtin::datetime())
}

#[tokio::test]
async fn test_load_or_create_writes_defaults_when_auto_save() {
    let f = fixture(true);
    let config = f.store.load_or_create(&person()).await;

    assert_eq!(config.read().properties.len(), 3);
    assert!(f.store.path_for(&person().identity).exists());
    assert!(f.catalog.contains(&person().identity));

    let again = f.store.load_or_create(&person()).await;
    assert!(Arc::ptr_eq(&config, &again));
}

#[tokio::test]
async fn test_load_or_create_without_auto_save_leaves_disk_alone() {
    let f = fixture(false);
    f.store.load_or_create(&person()).await;
    assert!(!f.store.path_for(&person().identity).exists());
}

#[tokio::test]
async fn test_saved_document_is_reloaded() {
    let f = fixture(false);
    let shared = f.store.load_or_create(&person()).await;
    let mut edited = shared.read().clone();
    edited.max_depth = 5;
    edited
        .property_mut("Age")
        .unwrap()
        .mode_settings
        .get_mut(&DisplayMode::List)
        .unwrap()
        .visible = false;

    let saved = f.store.save(edited).await.unwrap();
    // Existing handle observes the saved state
    assert!(Arc::ptr_eq(&saved, &shared));
    assert_eq!(shared.read().max_depth, 5);

    f.cache.clear();
    let reloaded = f.store.load_or_create(&person()).await;
    assert!(!Arc::ptr_eq(&reloaded, &shared));
    let reloaded = reloaded.read();
    assert_eq!(reloaded.max_depth, 5);
    assert!(!reloaded.property("Age").unwrap().settings_for(DisplayMode::List).visible);
}

#[tokio::test]
async fn test_corrupt_document_falls_back_to_defaults() {
    let f = fixture(false);
    let path = f.store.path_for(&person().identity);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let config = f.store.load_or_create(&person()).await;
    assert_eq!(config.read().properties.len(), 3);
    assert_eq!(config.read().max_depth, 3);
}

#[tokio::test]
async fn test_document_of_other_assembly_is_ignored() {
    let f = fixture(true);
    let legacy = TypeDescriptor::object("Crm.Person", "crm-legacy").with_property("Name", builtin::string());
    f.store.load_or_create(&legacy).await;
    f.cache.clear();

    // Same file name, different identity: defaults are generated instead
    let config = f.store.load_or_create(&person()).await;
    assert_eq!(config.read().assembly_name, "crm");
    assert_eq!(config.read().properties.len(), 3);
}

#[tokio::test]
async fn test_export_then_import() {
    let f = fixture(false);
    let shared = f.store.load_or_create(&person()).await;
    let exported = f.dir.path().join("exports").join("person.json");

    let mut snapshot = shared.read().clone();
    snapshot.property_mut("Name").unwrap().display_name = "Full name".to_string();
    f.store.export(&snapshot, &exported).await.unwrap();

    let imported = f.store.import(&exported).await.unwrap();
    assert!(Arc::ptr_eq(&imported, &shared));
    assert_eq!(shared.read().property("Name").unwrap().display_name, "Full name");
}

#[tokio::test]
async fn test_import_of_unknown_type_leaves_cache_untouched() {
    let f = fixture(true);
    let shared = f.store.load_or_create(&person()).await;
    let before = shared.read().clone();

    let mut foreign = before.clone();
    foreign.type_full_name = "Crm.Ghost".to_string();
    foreign.properties.clear();
    let source = f.dir.path().join("ghost.json");
    std::fs::write(&source, serde_json::to_string(&foreign).unwrap()).unwrap();

    let err = f.store.import(&source).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnresolvableType { .. })
    ));
    assert_eq!(f.cache.len(), 1);
    assert!(!f.cache.contains(&TypeIdentity::new("Crm.Ghost", "crm")));
    assert_eq!(*shared.read(), before);
}

#[tokio::test]
async fn test_import_of_malformed_document_is_serialization_error() {
    let f = fixture(false);
    let source = f.dir.path().join("broken.json");
    std::fs::write(&source, "[1, 2").unwrap();

    let err = f.store.import(&source).await.unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
    assert!(f.cache.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_leave_disk_and_cache_in_agreement() {
    let Fixture { dir: _dir, cache, store, .. } = fixture(false);
    let store = Arc::new(store);
    let base = store.load_or_create(&person()).await.read().clone();

    for _round in 0..20 {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let mut config = base.clone();
                config.property_mut("Name").unwrap().display_name = format!("Name {}", i);
                tokio::spawn(async move { store.save(config).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let path = store.path_for(&person().identity);
        let on_disk: viewcfg_types::VisualConfig =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let cached = cache.get(&person().identity).unwrap();
        assert_eq!(
            cached.read().property("Name").unwrap().display_name,
            on_disk.property("Name").unwrap().display_name
        );
    }
}
