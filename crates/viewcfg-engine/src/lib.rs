// Engine layer - display policy and value handling for visual configs
// Pure and synchronous: no file I/O, no global state

pub mod catalog;
pub mod edit;
pub mod error;
pub mod formatter;
pub mod history;
pub mod registry;
pub mod settings;
pub mod strategy;
pub mod tree;
pub mod validate;
pub mod value_cache;

pub use catalog::TypeCatalog;
pub use edit::EditSession;
pub use error::{EditError, Error, FormatError, ParseError, Result, SettingError, ValidationError};
pub use formatter::{FORMAT_PLACEHOLDER, LocalZone, ValueFormatter, ValueFormatterRegistry};
pub use history::ChangeTracker;
pub use registry::{DisplayStrategyRegistry, default_mode_settings};
pub use strategy::TypeDisplayStrategy;
pub use tree::{PropertyNode, build_property_tree};
pub use validate::validate;
pub use value_cache::ValueCache;

use parking_lot::RwLock;
use std::sync::Arc;
use viewcfg_types::VisualConfig;

/// Handle to a cached config; every holder sees the same instance
pub type SharedConfig = Arc<RwLock<VisualConfig>>;

pub fn share(config: VisualConfig) -> SharedConfig {
    Arc::new(RwLock::new(config))
}
