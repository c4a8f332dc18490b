use viewcfg_types::{TypeDisplayConfig, Value, keys};

use super::ValueFormatter;
use crate::error::{FormatError, ParseError};
use crate::settings;

pub const DEFAULT_TRUNCATION_SUFFIX: &str = "...";

/// Plain text with optional truncation; used for both `String` and `Text`
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

fn truncate(text: String, config: &TypeDisplayConfig) -> Result<String, FormatError> {
    let Some(max) = settings::opt_usize(config, keys::MAX_LENGTH)? else {
        return Ok(text);
    };
    if text.chars().count() <= max {
        return Ok(text);
    }
    let suffix = settings::str_or(config, keys::TRUNCATION_SUFFIX, DEFAULT_TRUNCATION_SUFFIX)?;
    let mut truncated: String = text.chars().take(max).collect();
    truncated.push_str(suffix);
    Ok(truncated)
}

impl ValueFormatter for TextFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        truncate(value.to_string(), config)
    }

    fn parse(&self, text: &str, _config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        Ok(Value::text(text))
    }
}
