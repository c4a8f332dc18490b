use std::collections::HashMap;
use std::sync::Arc;
use viewcfg_types::{
    DisplayMode, DisplaySettings, DisplayType, PropertyVisualConfig, TypeDescriptor, TypeIdentity,
    VisualConfig, builtin,
};

use crate::error::EditError;
use crate::formatter::DEFAULT_DATE_FORMAT;
use crate::strategy::{
    BooleanStrategy, CollectionStrategy, ComplexObjectStrategy, DateTimeStrategy, EnumStrategy,
    NumberStrategy, StringStrategy, TextStrategy, TypeDisplayStrategy,
};

const DEFAULT_ORDER: i32 = 100;

/// Initial settings of a freshly generated property for one mode
pub fn default_mode_settings(mode: DisplayMode) -> DisplaySettings {
    let mut settings = DisplaySettings {
        order: DEFAULT_ORDER,
        ..DisplaySettings::default()
    };
    match mode {
        DisplayMode::List => {}
        DisplayMode::Card => {
            settings.width = "200".to_string();
            settings.is_read_only = true;
        }
        DisplayMode::Detail => {
            settings.width = "*".to_string();
        }
    }
    settings
}

/// Maps type descriptors to display strategies and builds default configs
#[derive(Clone)]
pub struct DisplayStrategyRegistry {
    exact: HashMap<String, Arc<dyn TypeDisplayStrategy>>,
    enumeration: Arc<dyn TypeDisplayStrategy>,
    collection: Arc<dyn TypeDisplayStrategy>,
    complex: Arc<dyn TypeDisplayStrategy>,
    fallback: Arc<dyn TypeDisplayStrategy>,
}

impl Default for DisplayStrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisplayStrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut exact: Vec<&String> = self.exact.keys().collect();
        exact.sort();
        f.debug_struct("DisplayStrategyRegistry")
            .field("exact", &exact)
            .finish()
    }
}

impl DisplayStrategyRegistry {
    pub fn new() -> Self {
        Self::with_date_format(DEFAULT_DATE_FORMAT)
    }

    /// Registry whose date/time strategy defaults to `format`
    pub fn with_date_format(format: &str) -> Self {
        let number: Arc<dyn TypeDisplayStrategy> = Arc::new(NumberStrategy);
        let mut exact: HashMap<String, Arc<dyn TypeDisplayStrategy>> = HashMap::new();

        exact.insert(builtin::identity(builtin::STRING).cache_key(), Arc::new(StringStrategy));
        for name in builtin::INTEGERS.iter().chain(builtin::FLOATS.iter()) {
            exact.insert(builtin::identity(name).cache_key(), number.clone());
        }
        exact.insert(
            builtin::identity(builtin::DATETIME).cache_key(),
            Arc::new(DateTimeStrategy::new(format)),
        );
        exact.insert(builtin::identity(builtin::BOOL).cache_key(), Arc::new(BooleanStrategy));

        Self {
            exact,
            enumeration: Arc::new(EnumStrategy),
            collection: Arc::new(CollectionStrategy),
            complex: Arc::new(ComplexObjectStrategy),
            fallback: Arc::new(TextStrategy),
        }
    }

    /// Bind a strategy to an exact type, taking precedence over classification
    pub fn register(&mut self, identity: &TypeIdentity, strategy: Arc<dyn TypeDisplayStrategy>) {
        self.exact.insert(identity.cache_key(), strategy);
    }

    /// First match wins: exact table, enumeration, non-string iterable,
    /// non-primitive structured type, then the text fallback.
    pub fn get_strategy(&self, ty: &TypeDescriptor) -> Arc<dyn TypeDisplayStrategy> {
        if let Some(strategy) = self.exact.get(&ty.identity.cache_key()) {
            return strategy.clone();
        }

        let is_string = ty.identity == builtin::identity(builtin::STRING);
        if ty.traits.enumeration {
            self.enumeration.clone()
        } else if ty.traits.iterable && !is_string {
            self.collection.clone()
        } else if !ty.traits.primitive && !is_string {
            self.complex.clone()
        } else {
            self.fallback.clone()
        }
    }

    pub fn classify(&self, ty: &TypeDescriptor) -> DisplayType {
        self.get_strategy(ty).display_type()
    }

    fn property_config(&self, path: &str, name: &str, ty: &TypeDescriptor) -> PropertyVisualConfig {
        let mut type_config = self.get_strategy(ty).default_config();
        type_config.type_name = ty.identity.full_name.clone();

        PropertyVisualConfig {
            property_path: path.to_string(),
            display_name: name.to_string(),
            mode_settings: DisplayMode::ALL
                .into_iter()
                .map(|mode| (mode, default_mode_settings(mode)))
                .collect(),
            type_config,
        }
    }

    /// Default config with one entry per public property, in every mode.
    /// Property types nobody recognizes end up as text.
    pub fn create_default_config(&self, ty: &TypeDescriptor) -> VisualConfig {
        let mut config = VisualConfig::new(&ty.identity);
        for property in &ty.properties {
            config.insert_property(self.property_config(&property.name, &property.name, &property.ty));
        }
        tracing::debug!(
            type_name = %ty.identity,
            properties = config.properties.len(),
            "created default config"
        );
        config
    }

    /// Add `path.child` entries for a complex property.
    ///
    /// Returns how many entries were added; nothing is added when the
    /// children would exceed the config's `MaxDepth` or the property is
    /// not a complex object.
    pub fn expand_property(
        &self,
        config: &mut VisualConfig,
        ty: &TypeDescriptor,
        path: &str,
    ) -> Result<usize, EditError> {
        let nested = ty
            .property_at(path)
            .ok_or_else(|| EditError::UnknownProperty(path.to_string()))?;

        let child_depth = path.split('.').count() + 1;
        if child_depth > config.max_depth as usize
            || self.classify(nested) != DisplayType::ComplexObject
        {
            return Ok(0);
        }

        let mut added = 0;
        for child in &nested.properties {
            let child_path = format!("{}.{}", path, child.name);
            let entry = self.property_config(&child_path, &child.name, &child.ty);
            if config.insert_property(entry) {
                added += 1;
            }
        }
        Ok(added)
    }
}
