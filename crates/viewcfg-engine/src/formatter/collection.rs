use viewcfg_types::{DisplayType, TypeDisplayConfig, Value, keys};

use super::ValueFormatter;
use crate::error::{FormatError, ParseError};
use crate::settings;

pub const DEFAULT_MAX_DISPLAY_ITEMS: usize = 5;
pub const DEFAULT_SEPARATOR: &str = ", ";
const ELLIPSIS: &str = "...";

/// Joins the leading items of a list: `a, b, c, ... (7 items)`
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionFormatter;

fn strip_count(text: &str) -> &str {
    let Some(body) = text.strip_suffix(" items)").or_else(|| text.strip_suffix(" item)")) else {
        return text;
    };
    match body.rfind('(') {
        Some(open) if body[open + 1..].chars().all(|c| c.is_ascii_digit()) => text[..open].trim_end(),
        _ => text,
    }
}

impl ValueFormatter for CollectionFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        let items = match value {
            Value::Null => return Ok(String::new()),
            Value::List(items) => items,
            other => {
                return Err(FormatError::TypeMismatch {
                    display_type: DisplayType::Collection,
                    found: format!("{:?}", other),
                });
            }
        };

        let max = settings::opt_usize(config, keys::MAX_DISPLAY_ITEMS)?.unwrap_or(DEFAULT_MAX_DISPLAY_ITEMS);
        let separator = settings::str_or(config, keys::SEPARATOR, DEFAULT_SEPARATOR)?;
        let show_count = settings::bool_or(config, keys::SHOW_COUNT, true)?;

        let mut parts: Vec<String> = items.iter().take(max).map(|item| item.to_string()).collect();
        if items.len() > max {
            parts.push(ELLIPSIS.to_string());
        }
        let mut text = parts.join(separator);

        if show_count {
            let noun = if items.len() == 1 { "item" } else { "items" };
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("({} {})", items.len(), noun));
        }
        Ok(text)
    }

    /// Splits on the separator; text shortened with an ellipsis cannot be read back
    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        let separator = settings::str_or(config, keys::SEPARATOR, DEFAULT_SEPARATOR)?;
        let body = strip_count(text.trim());
        if body.is_empty() {
            return Ok(Value::List(Vec::new()));
        }

        let delimiter = if separator.trim().is_empty() { separator } else { separator.trim() };
        let items: Vec<&str> = body.split(delimiter).map(str::trim).collect();
        if items.last() == Some(&ELLIPSIS) {
            return Err(ParseError::invalid(DisplayType::Collection, text, "collection was truncated"));
        }
        Ok(Value::List(items.into_iter().map(Value::text).collect()))
    }
}
