use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Named view granularity for the same type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisplayMode {
    /// One row per item
    List,
    /// Preview card
    Card,
    /// Full detail view
    Detail,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::List, DisplayMode::Card, DisplayMode::Detail];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::List => "List",
            DisplayMode::Card => "Card",
            DisplayMode::Detail => "Detail",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "display mode",
                name: s.to_string(),
            })
    }
}

/// Semantic category of a value, independent of display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayType {
    Text,
    String,
    Number,
    DateTime,
    Boolean,
    Enum,
    Collection,
    ComplexObject,
    Image,
    File,
    Link,
    Custom,
}

impl DisplayType {
    pub const ALL: [DisplayType; 12] = [
        DisplayType::Text,
        DisplayType::String,
        DisplayType::Number,
        DisplayType::DateTime,
        DisplayType::Boolean,
        DisplayType::Enum,
        DisplayType::Collection,
        DisplayType::ComplexObject,
        DisplayType::Image,
        DisplayType::File,
        DisplayType::Link,
        DisplayType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Text => "Text",
            DisplayType::String => "String",
            DisplayType::Number => "Number",
            DisplayType::DateTime => "DateTime",
            DisplayType::Boolean => "Boolean",
            DisplayType::Enum => "Enum",
            DisplayType::Collection => "Collection",
            DisplayType::ComplexObject => "ComplexObject",
            DisplayType::Image => "Image",
            DisplayType::File => "File",
            DisplayType::Link => "Link",
            DisplayType::Custom => "Custom",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal alignment of a rendered field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Stretch,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
            Alignment::Stretch => "Stretch",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Alignment::Left, Alignment::Center, Alignment::Right, Alignment::Stretch]
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "alignment",
                name: s.to_string(),
            })
    }
}

/// Parsed form of a width/height string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Size to content
    Auto,
    /// Share of remaining space (`"*"` is a weight of 1)
    Star(f64),
    /// Fixed size in device-independent units
    Fixed(f64),
}

impl Length {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }

        if let Some(weight) = trimmed.strip_suffix('*') {
            if weight.is_empty() {
                return Ok(Length::Star(1.0));
            }
            return match weight.parse::<f64>() {
                Ok(w) if w.is_finite() && w > 0.0 => Ok(Length::Star(w)),
                _ => Err(Error::InvalidLength(raw.to_string())),
            };
        }

        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Length::Fixed(v)),
            _ => Err(Error::InvalidLength(raw.to_string())),
        }
    }
}

/// Opaque reference to a style or template owned by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiHandle(String);

impl UiHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-mode presentation of one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DisplaySettings {
    pub visible: bool,
    pub order: i32,
    pub width: String,
    pub height: String,
    pub alignment: Alignment,
    pub is_read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<UiHandle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<UiHandle>,
}

impl Default for DisplaySettings {
    /// Fallback used when a supported mode has no entry
    fn default() -> Self {
        Self {
            visible: true,
            order: 0,
            width: "Auto".to_string(),
            height: "Auto".to_string(),
            alignment: Alignment::Left,
            is_read_only: false,
            format: None,
            style: None,
            template: None,
        }
    }
}

impl DisplaySettings {
    pub fn width_length(&self) -> Result<Length> {
        Length::parse(&self.width)
    }

    pub fn height_length(&self) -> Result<Length> {
        Length::parse(&self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("Auto").unwrap(), Length::Auto);
        assert_eq!(Length::parse("auto").unwrap(), Length::Auto);
        assert_eq!(Length::parse("*").unwrap(), Length::Star(1.0));
        assert_eq!(Length::parse("2.5*").unwrap(), Length::Star(2.5));
        assert_eq!(Length::parse("200").unwrap(), Length::Fixed(200.0));
        assert!(Length::parse("wide").is_err());
        assert!(Length::parse("-3").is_err());
        assert!(Length::parse("0*").is_err());
    }

    #[test]
    fn test_display_mode_from_str() {
        assert_eq!("card".parse::<DisplayMode>().unwrap(), DisplayMode::Card);
        assert!("grid".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_default_settings_fallback() {
        let settings = DisplaySettings::default();
        assert!(settings.visible);
        assert_eq!(settings.order, 0);
        assert_eq!(settings.width, "Auto");
    }

    #[test]
    fn test_enums_serialize_as_names() {
        let json = serde_json::to_string(&DisplayType::ComplexObject).unwrap();
        assert_eq!(json, "\"ComplexObject\"");
        let json = serde_json::to_string(&Alignment::Right).unwrap();
        assert_eq!(json, "\"Right\"");
    }
}
