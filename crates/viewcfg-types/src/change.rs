use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::display::DisplayMode;
use crate::setting::SettingValue;

/// Field of `DisplaySettings` addressable by an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayField {
    Visible,
    Order,
    Width,
    Height,
    Alignment,
    IsReadOnly,
    Format,
}

impl DisplayField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayField::Visible => "Visible",
            DisplayField::Order => "Order",
            DisplayField::Width => "Width",
            DisplayField::Height => "Height",
            DisplayField::Alignment => "Alignment",
            DisplayField::IsReadOnly => "IsReadOnly",
            DisplayField::Format => "Format",
        }
    }
}

/// What part of a property's configuration a change touched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChangeTarget {
    DisplayName,
    TypeSetting { key: String },
    ModeSetting { mode: DisplayMode, field: DisplayField },
    /// Config-level depth limit; the property path is empty
    MaxDepth,
}

impl fmt::Display for ChangeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeTarget::DisplayName => f.write_str("DisplayName"),
            ChangeTarget::TypeSetting { key } => write!(f, "Settings.{}", key),
            ChangeTarget::ModeSetting { mode, field } => write!(f, "{}.{}", mode, field.as_str()),
            ChangeTarget::MaxDepth => f.write_str("MaxDepth"),
        }
    }
}

/// Immutable record of one edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationChange {
    property_path: String,
    target: ChangeTarget,
    old_value: SettingValue,
    new_value: SettingValue,
    timestamp: DateTime<Utc>,
}

impl ConfigurationChange {
    pub fn new(
        property_path: impl Into<String>,
        target: ChangeTarget,
        old_value: SettingValue,
        new_value: SettingValue,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            target,
            old_value,
            new_value,
            timestamp: Utc::now(),
        }
    }

    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    pub fn target(&self) -> &ChangeTarget {
        &self.target
    }

    pub fn old_value(&self) -> &SettingValue {
        &self.old_value
    }

    pub fn new_value(&self) -> &SettingValue {
        &self.new_value
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The change that undoes this one
    pub fn inverted(&self) -> Self {
        Self {
            property_path: self.property_path.clone(),
            target: self.target.clone(),
            old_value: self.new_value.clone(),
            new_value: self.old_value.clone(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for ConfigurationChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {}",
            self.property_path, self.target, self.old_value, self.new_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_swaps_values() {
        let change = ConfigurationChange::new(
            "Name",
            ChangeTarget::ModeSetting {
                mode: DisplayMode::List,
                field: DisplayField::Order,
            },
            SettingValue::Int(100),
            SettingValue::Int(5),
        );
        let inverse = change.inverted();
        assert_eq!(inverse.old_value(), &SettingValue::Int(5));
        assert_eq!(inverse.new_value(), &SettingValue::Int(100));
        assert_eq!(inverse.target(), change.target());
        assert_eq!(change.to_string(), "Name List.Order: 100 -> 5");
    }
}
