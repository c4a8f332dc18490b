use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a strategy's settings bag.
///
/// Serialized untagged so documents stay readable: `null`, `true`, `2`,
/// `2.5`, `"text"`. Enumeration names are written as `{"enum": "Name"}`
/// to keep them distinct from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Enum {
        #[serde(rename = "enum")]
        name: String,
    },
}

impl SettingValue {
    pub fn text(s: impl Into<String>) -> Self {
        SettingValue::Text(s.into())
    }

    pub fn enum_name(name: impl Into<String>) -> Self {
        SettingValue::Enum { name: name.into() }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; whole floats are accepted since documents may carry `2.0`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            SettingValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Int(i) => Some(*i as f64),
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Enumeration name; plain text is accepted for hand-edited documents
    pub fn as_enum_name(&self) -> Option<&str> {
        match self {
            SettingValue::Enum { name } => Some(name),
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Null => "null",
            SettingValue::Bool(_) => "boolean",
            SettingValue::Int(_) => "integer",
            SettingValue::Float(_) => "number",
            SettingValue::Text(_) => "text",
            SettingValue::Enum { .. } => "enum name",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Null => f.write_str("null"),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Text(s) => f.write_str(s),
            SettingValue::Enum { name } => f.write_str(name),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Int(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        SettingValue::Int(i as i64)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Float(v)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SettingValue::Null)
    }
}

/// Setting names understood by the built-in strategies and formatters
pub mod keys {
    // String / Text
    pub const MAX_LENGTH: &str = "MaxLength";
    pub const TRUNCATION_SUFFIX: &str = "TruncationSuffix";
    pub const WRAP: &str = "Wrap";
    pub const FONT_SIZE: &str = "FontSize";

    // Number
    pub const DECIMAL_PLACES: &str = "DecimalPlaces";
    pub const USE_THOUSANDS_SEPARATOR: &str = "UseThousandsSeparator";
    pub const MIN_VALUE: &str = "MinValue";
    pub const MAX_VALUE: &str = "MaxValue";
    pub const UNIT: &str = "Unit";

    // DateTime
    pub const FORMAT: &str = "Format";
    pub const SHOW_TIME: &str = "ShowTime";
    pub const SHOW_SECONDS: &str = "ShowSeconds";
    pub const USE_LOCAL_TIME: &str = "UseLocalTime";

    // Boolean
    pub const TRUE_TEXT: &str = "TrueText";
    pub const FALSE_TEXT: &str = "FalseText";
    pub const USE_CHECKBOX: &str = "UseCheckbox";
    pub const TRUE_COLOR: &str = "TrueColor";
    pub const FALSE_COLOR: &str = "FalseColor";

    // Enum
    pub const USE_DESCRIPTION: &str = "UseDescription";
    pub const SHOW_AS_COMBO_BOX: &str = "ShowAsComboBox";
    pub const ALLOW_MULTIPLE: &str = "AllowMultiple";
    pub const SORT_BY_DESCRIPTION: &str = "SortByDescription";

    // Collection
    pub const MAX_DISPLAY_ITEMS: &str = "MaxDisplayItems";
    pub const SEPARATOR: &str = "Separator";
    pub const SHOW_COUNT: &str = "ShowCount";
    pub const ALLOW_EXPAND: &str = "AllowExpand";

    // ComplexObject
    pub const EXPAND_BY_DEFAULT: &str = "ExpandByDefault";
    pub const MAX_DEPTH: &str = "MaxDepth";
    pub const SHOW_TYPE: &str = "ShowType";
}
