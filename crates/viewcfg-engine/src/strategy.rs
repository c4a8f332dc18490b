use viewcfg_types::{DisplayType, SettingValue, TypeDisplayConfig, Value, keys};

use crate::error::FormatError;
use crate::formatter::{
    BooleanFormatter, CollectionFormatter, DEFAULT_DATE_FORMAT, DateTimeFormatter, DefaultFormatter,
    EnumFormatter, NumberFormatter, TextFormatter, ValueFormatter,
};

/// Per-type display policy: category, default settings and a basic renderer
pub trait TypeDisplayStrategy: Send + Sync {
    fn display_type(&self) -> DisplayType;

    /// Fresh settings bag; the `type_name` is filled in by the caller
    fn default_config(&self) -> TypeDisplayConfig;

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError>;
}

fn text_defaults(display_type: DisplayType) -> TypeDisplayConfig {
    TypeDisplayConfig::new(display_type)
        .with(keys::MAX_LENGTH, SettingValue::Null)
        .with(keys::TRUNCATION_SUFFIX, "...")
        .with(keys::WRAP, false)
        .with(keys::FONT_SIZE, 12)
}

#[derive(Debug, Default)]
pub struct StringStrategy;

impl TypeDisplayStrategy for StringStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::String
    }

    fn default_config(&self) -> TypeDisplayConfig {
        text_defaults(DisplayType::String)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        TextFormatter.format(value, config)
    }
}

/// Fallback for types no other strategy claims
#[derive(Debug, Default)]
pub struct TextStrategy;

impl TypeDisplayStrategy for TextStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::Text
    }

    fn default_config(&self) -> TypeDisplayConfig {
        text_defaults(DisplayType::Text)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        TextFormatter.format(value, config)
    }
}

#[derive(Debug, Default)]
pub struct NumberStrategy;

impl TypeDisplayStrategy for NumberStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::Number
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::Number)
            .with(keys::DECIMAL_PLACES, 2)
            .with(keys::USE_THOUSANDS_SEPARATOR, true)
            .with(keys::MIN_VALUE, SettingValue::Null)
            .with(keys::MAX_VALUE, SettingValue::Null)
            .with(keys::UNIT, "")
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        NumberFormatter.format(value, config)
    }
}

#[derive(Debug)]
pub struct DateTimeStrategy {
    format: String,
}

impl Default for DateTimeStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateTimeStrategy {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl TypeDisplayStrategy for DateTimeStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::DateTime
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::DateTime)
            .with(keys::FORMAT, self.format.as_str())
            .with(keys::SHOW_TIME, true)
            .with(keys::SHOW_SECONDS, true)
            .with(keys::USE_LOCAL_TIME, true)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        DateTimeFormatter::default().format(value, config)
    }
}

#[derive(Debug, Default)]
pub struct BooleanStrategy;

impl TypeDisplayStrategy for BooleanStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::Boolean
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::Boolean)
            .with(keys::TRUE_TEXT, "Yes")
            .with(keys::FALSE_TEXT, "No")
            .with(keys::USE_CHECKBOX, true)
            .with(keys::TRUE_COLOR, "#28a745")
            .with(keys::FALSE_COLOR, "#dc3545")
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        BooleanFormatter.format(value, config)
    }
}

#[derive(Debug, Default)]
pub struct EnumStrategy;

impl TypeDisplayStrategy for EnumStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::Enum
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::Enum)
            .with(keys::USE_DESCRIPTION, true)
            .with(keys::SHOW_AS_COMBO_BOX, false)
            .with(keys::ALLOW_MULTIPLE, false)
            .with(keys::SORT_BY_DESCRIPTION, true)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        EnumFormatter::default().format(value, config)
    }
}

#[derive(Debug, Default)]
pub struct CollectionStrategy;

impl TypeDisplayStrategy for CollectionStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::Collection
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::Collection)
            .with(keys::MAX_DISPLAY_ITEMS, 5)
            .with(keys::SEPARATOR, ", ")
            .with(keys::SHOW_COUNT, true)
            .with(keys::ALLOW_EXPAND, true)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        CollectionFormatter.format(value, config)
    }
}

#[derive(Debug, Default)]
pub struct ComplexObjectStrategy;

impl TypeDisplayStrategy for ComplexObjectStrategy {
    fn display_type(&self) -> DisplayType {
        DisplayType::ComplexObject
    }

    fn default_config(&self) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::ComplexObject)
            .with(keys::EXPAND_BY_DEFAULT, false)
            .with(keys::MAX_DEPTH, 2)
            .with(keys::SHOW_TYPE, true)
    }

    fn format_value(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        DefaultFormatter.format(value, config)
    }
}
