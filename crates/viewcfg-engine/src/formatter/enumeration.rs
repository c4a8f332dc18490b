use std::sync::Arc;
use viewcfg_types::{DisplayType, EnumValue, TypeDisplayConfig, Value, keys};

use super::ValueFormatter;
use crate::catalog::TypeCatalog;
use crate::error::{FormatError, ParseError};
use crate::settings;

/// Member description or name.
///
/// With a catalog, parsing resolves the bound enumeration and accepts a
/// member name or description; without one the text becomes the member name.
#[derive(Debug, Default, Clone)]
pub struct EnumFormatter {
    catalog: Option<Arc<TypeCatalog>>,
}

impl EnumFormatter {
    pub fn with_catalog(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }
}

impl ValueFormatter for EnumFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        let use_description = settings::bool_or(config, keys::USE_DESCRIPTION, true)?;
        match value {
            Value::Null => Ok(String::new()),
            Value::Enum(e) => Ok(match (&e.description, use_description) {
                (Some(description), true) => description.clone(),
                _ => e.member.clone(),
            }),
            other => Err(FormatError::TypeMismatch {
                display_type: DisplayType::Enum,
                found: format!("{:?}", other),
            }),
        }
    }

    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        let input = text.trim();
        let enumeration = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.find_by_name(&config.type_name))
            .filter(|ty| ty.traits.enumeration);

        let Some(enumeration) = enumeration else {
            return Ok(Value::Enum(EnumValue::new(input)));
        };

        enumeration
            .members
            .iter()
            .find(|m| {
                m.name.eq_ignore_ascii_case(input)
                    || m.description
                        .as_deref()
                        .is_some_and(|d| d.eq_ignore_ascii_case(input))
            })
            .map(|m| {
                Value::Enum(EnumValue {
                    member: m.name.clone(),
                    description: m.description.clone(),
                })
            })
            .ok_or_else(|| {
                ParseError::invalid(
                    DisplayType::Enum,
                    text,
                    format!("no member of {}", enumeration.identity.full_name),
                )
            })
    }
}
