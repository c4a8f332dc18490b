mod boolean;
mod collection;
mod datetime;
mod enumeration;
mod fallback;
mod number;
pub mod pattern;
mod text;

pub use boolean::BooleanFormatter;
pub use collection::CollectionFormatter;
pub use datetime::{DEFAULT_DATE_FORMAT, DateTimeFormatter, LocalZone};
pub use enumeration::EnumFormatter;
pub use fallback::DefaultFormatter;
pub use number::NumberFormatter;
pub use text::TextFormatter;

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use viewcfg_types::{DisplayType, TypeDisplayConfig, Value};

use crate::catalog::TypeCatalog;
use crate::error::{FormatError, ParseError};
use crate::value_cache::ValueCache;

/// Shown in place of a value that could not be formatted
pub const FORMAT_PLACEHOLDER: &str = "#FORMAT!";

/// Renders values of one display type and reads them back
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError>;
    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError>;
}

/// Formatter lookup by display type, with an optional cache of rendered strings
#[derive(Clone)]
pub struct ValueFormatterRegistry {
    formatters: HashMap<DisplayType, Arc<dyn ValueFormatter>>,
    fallback: Arc<dyn ValueFormatter>,
    cache: Option<Arc<ValueCache>>,
}

impl Default for ValueFormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValueFormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.formatters.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("ValueFormatterRegistry")
            .field("formatters", &types)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

fn settings_fingerprint(config: &TypeDisplayConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.type_name.hash(&mut hasher);
    for (key, value) in &config.settings {
        key.hash(&mut hasher);
        value.to_string().hash(&mut hasher);
        value.kind().hash(&mut hasher);
    }
    hasher.finish()
}

impl ValueFormatterRegistry {
    pub fn new() -> Self {
        let text: Arc<dyn ValueFormatter> = Arc::new(TextFormatter);
        let mut formatters: HashMap<DisplayType, Arc<dyn ValueFormatter>> = HashMap::new();
        formatters.insert(DisplayType::Text, text.clone());
        formatters.insert(DisplayType::String, text);
        formatters.insert(DisplayType::Number, Arc::new(NumberFormatter));
        formatters.insert(DisplayType::DateTime, Arc::new(DateTimeFormatter::default()));
        formatters.insert(DisplayType::Boolean, Arc::new(BooleanFormatter));
        formatters.insert(DisplayType::Enum, Arc::new(EnumFormatter::default()));
        formatters.insert(DisplayType::Collection, Arc::new(CollectionFormatter));

        Self {
            formatters,
            fallback: Arc::new(DefaultFormatter),
            cache: None,
        }
    }

    /// Use a fixed zone for UTC/local conversions instead of the machine's
    pub fn with_local_zone(mut self, zone: LocalZone) -> Self {
        self.formatters
            .insert(DisplayType::DateTime, Arc::new(DateTimeFormatter::new(zone)));
        self
    }

    /// Resolve enumeration members through the catalog when parsing
    pub fn with_catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.formatters
            .insert(DisplayType::Enum, Arc::new(EnumFormatter::with_catalog(catalog)));
        self
    }

    pub fn with_value_cache(mut self, cache: Arc<ValueCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the formatter of a display type
    pub fn register(&mut self, display_type: DisplayType, formatter: Arc<dyn ValueFormatter>) {
        self.formatters.insert(display_type, formatter);
    }

    pub fn get_formatter(&self, display_type: DisplayType) -> Arc<dyn ValueFormatter> {
        self.formatters
            .get(&display_type)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn value_cache(&self) -> Option<&Arc<ValueCache>> {
        self.cache.as_ref()
    }

    pub fn try_format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        self.get_formatter(config.display_type).format(value, config)
    }

    /// Format for display; failures are logged and rendered as [`FORMAT_PLACEHOLDER`]
    pub fn format(&self, value: &Value, config: &TypeDisplayConfig) -> String {
        match self.try_format(value, config) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(display_type = %config.display_type, error = %err, "format failed");
                FORMAT_PLACEHOLDER.to_string()
            }
        }
    }

    /// Like [`format`](Self::format), memoized under a caller-chosen key
    /// combined with the settings, so an edited config renders afresh.
    /// Without a value cache this formats every time.
    pub fn format_cached(&self, key: &str, value: &Value, config: &TypeDisplayConfig) -> String {
        let Some(cache) = &self.cache else {
            return self.format(value, config);
        };
        let cache_key = format!("{}:{}:{:016x}", config.display_type, key, settings_fingerprint(config));
        cache
            .get_or_try_insert_with(&cache_key, || self.try_format(value, config))
            .unwrap_or_else(|err| {
                tracing::warn!(display_type = %config.display_type, error = %err, "format failed");
                FORMAT_PLACEHOLDER.to_string()
            })
    }

    pub fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        self.get_formatter(config.display_type).parse(text, config)
    }
}
