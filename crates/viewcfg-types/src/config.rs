use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::descriptor::TypeIdentity;
use crate::display::{DisplayMode, DisplaySettings, DisplayType};
use crate::setting::SettingValue;

pub const CURRENT_VERSION: &str = "1.0";
pub const DEFAULT_MAX_DEPTH: u32 = 3;

fn default_version() -> String {
    CURRENT_VERSION.to_string()
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_modes() -> Vec<DisplayMode> {
    DisplayMode::ALL.to_vec()
}

/// How values of one type are rendered: display category plus its settings bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeDisplayConfig {
    /// Full name of the bound value type, empty when not bound
    #[serde(default)]
    pub type_name: String,
    pub display_type: DisplayType,
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

impl TypeDisplayConfig {
    pub fn new(display_type: DisplayType) -> Self {
        Self {
            type_name: String::new(),
            display_type,
            settings: BTreeMap::new(),
        }
    }

    /// Builder: add a setting
    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    /// Replace a setting, returning the previous value
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.settings.insert(key.to_string(), value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyVisualConfig {
    pub property_path: String,
    pub display_name: String,
    #[serde(default)]
    pub mode_settings: BTreeMap<DisplayMode, DisplaySettings>,
    pub type_config: TypeDisplayConfig,
}

impl PropertyVisualConfig {
    /// Settings for a mode, or the documented fallback when the entry is absent
    pub fn settings_for(&self, mode: DisplayMode) -> DisplaySettings {
        self.mode_settings.get(&mode).cloned().unwrap_or_default()
    }

    /// Number of path segments, 1 for a top-level property
    pub fn depth(&self) -> usize {
        self.property_path.split('.').count()
    }
}

/// Display configuration of one host type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisualConfig {
    pub type_full_name: String,
    pub assembly_name: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyVisualConfig>,
    #[serde(default = "default_modes")]
    pub supported_modes: Vec<DisplayMode>,
    /// Stops recursive expansion of nested complex objects
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl VisualConfig {
    pub fn new(identity: &TypeIdentity) -> Self {
        Self {
            type_full_name: identity.full_name.clone(),
            assembly_name: identity.assembly.clone(),
            last_modified: Utc::now(),
            version: default_version(),
            properties: BTreeMap::new(),
            supported_modes: default_modes(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(&self.type_full_name, &self.assembly_name)
    }

    pub fn property(&self, path: &str) -> Option<&PropertyVisualConfig> {
        self.properties.get(path)
    }

    pub fn property_mut(&mut self, path: &str) -> Option<&mut PropertyVisualConfig> {
        self.properties.get_mut(path)
    }

    /// Insert keyed by the property's own path; returns false if the path already exists
    pub fn insert_property(&mut self, property: PropertyVisualConfig) -> bool {
        if self.properties.contains_key(&property.property_path) {
            return false;
        }
        self.properties
            .insert(property.property_path.clone(), property);
        true
    }

    pub fn supports(&self, mode: DisplayMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    /// Mode settings of the first property, or the fallback for an empty config
    pub fn mode_settings(&self, mode: DisplayMode) -> DisplaySettings {
        self.properties
            .values()
            .next()
            .map(|p| p.settings_for(mode))
            .unwrap_or_default()
    }

    /// Visible properties of a mode, sorted by order then path
    pub fn visible_properties(&self, mode: DisplayMode) -> Vec<&PropertyVisualConfig> {
        let mut visible: Vec<_> = self
            .properties
            .values()
            .filter(|p| p.settings_for(mode).visible)
            .collect();
        visible.sort_by_key(|p| (p.settings_for(mode).order, p.property_path.clone()));
        visible
    }

    /// Bring a loaded document in line with the model invariants:
    /// duplicate modes dropped, missing mode entries filled, `MaxDepth` at least 1
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.supported_modes.len());
        self.supported_modes.retain(|mode| {
            if seen.contains(mode) {
                false
            } else {
                seen.push(*mode);
                true
            }
        });

        for property in self.properties.values_mut() {
            for mode in &self.supported_modes {
                property.mode_settings.entry(*mode).or_default();
            }
        }

        if self.max_depth == 0 {
            self.max_depth = 1;
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayType;

    fn property(path: &str) -> PropertyVisualConfig {
        PropertyVisualConfig {
            property_path: path.to_string(),
            display_name: path.to_string(),
            mode_settings: BTreeMap::new(),
            type_config: TypeDisplayConfig::new(DisplayType::Text),
        }
    }

    #[test]
    fn test_document_field_names() {
        let mut config = VisualConfig::new(&TypeIdentity::new("Shop.Order", "shop"));
        config.insert_property(property("Id"));
        let json = serde_json::to_value(&config).unwrap();

        for field in [
            "TypeFullName",
            "AssemblyName",
            "LastModified",
            "Version",
            "Properties",
            "SupportedModes",
            "MaxDepth",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["SupportedModes"][1], "Card");
        assert_eq!(json["Properties"]["Id"]["TypeConfig"]["DisplayType"], "Text");
    }

    #[test]
    fn test_insert_property_keeps_keys_unique() {
        let mut config = VisualConfig::new(&TypeIdentity::new("Shop.Order", "shop"));
        assert!(config.insert_property(property("Id")));
        assert!(!config.insert_property(property("Id")));
        assert_eq!(config.properties.len(), 1);
    }

    #[test]
    fn test_missing_mode_falls_back() {
        let p = property("Id");
        let settings = p.settings_for(DisplayMode::Card);
        assert!(settings.visible);
        assert_eq!(settings.order, 0);
        assert_eq!(settings.width, "Auto");
    }

    #[test]
    fn test_normalize() {
        let mut config = VisualConfig::new(&TypeIdentity::new("Shop.Order", "shop"));
        config.supported_modes = vec![DisplayMode::List, DisplayMode::Detail, DisplayMode::List];
        config.max_depth = 0;
        config.insert_property(property("Id"));

        config.normalize();

        assert_eq!(config.supported_modes, vec![DisplayMode::List, DisplayMode::Detail]);
        assert_eq!(config.max_depth, 1);
        let id = config.property("Id").unwrap();
        assert_eq!(id.mode_settings.len(), 2);
        assert!(!id.mode_settings.contains_key(&DisplayMode::Card));
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{
            "TypeFullName": "Shop.Order",
            "AssemblyName": "shop",
            "LastModified": "2025-01-02T03:04:05Z"
        }"#;
        let config: VisualConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.supported_modes.len(), 3);
        assert!(config.properties.is_empty());
    }
}
