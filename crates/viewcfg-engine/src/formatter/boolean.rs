use viewcfg_types::{DisplayType, TypeDisplayConfig, Value, keys};

use super::ValueFormatter;
use crate::error::{FormatError, ParseError};
use crate::settings;

pub const DEFAULT_TRUE_TEXT: &str = "Yes";
pub const DEFAULT_FALSE_TEXT: &str = "No";

#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanFormatter;

impl ValueFormatter for BooleanFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Bool(true) => Ok(settings::str_or(config, keys::TRUE_TEXT, DEFAULT_TRUE_TEXT)?.to_string()),
            Value::Bool(false) => Ok(settings::str_or(config, keys::FALSE_TEXT, DEFAULT_FALSE_TEXT)?.to_string()),
            other => Err(FormatError::TypeMismatch {
                display_type: DisplayType::Boolean,
                found: format!("{:?}", other),
            }),
        }
    }

    /// Only `TrueText` is recognized; any other input reads as `false`
    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        let true_text = settings::str_or(config, keys::TRUE_TEXT, DEFAULT_TRUE_TEXT)?;
        Ok(Value::Bool(text.to_lowercase() == true_text.to_lowercase()))
    }
}
