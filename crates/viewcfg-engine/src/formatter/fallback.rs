use viewcfg_types::{TypeDisplayConfig, Value};

use super::ValueFormatter;
use crate::error::{FormatError, ParseError};

/// Textual representation for display types without a dedicated formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl ValueFormatter for DefaultFormatter {
    fn format(&self, value: &Value, _config: &TypeDisplayConfig) -> Result<String, FormatError> {
        Ok(value.to_string())
    }

    fn parse(&self, text: &str, _config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        Ok(Value::text(text))
    }
}
