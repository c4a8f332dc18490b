use viewcfg_types::{DisplayType, TypeDisplayConfig, Value, builtin, keys};

use super::ValueFormatter;
use crate::error::{FormatError, ParseError, SettingError};
use crate::settings;

pub const DEFAULT_DECIMAL_PLACES: i64 = 2;
pub const MAX_DECIMAL_PLACES: usize = 99;

/// `N{d}` / `F{d}` numeric rendering with an optional unit suffix
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberFormatter;

fn decimal_places(config: &TypeDisplayConfig) -> Result<usize, SettingError> {
    let places = settings::int_or(config, keys::DECIMAL_PLACES, DEFAULT_DECIMAL_PLACES)?;
    usize::try_from(places)
        .ok()
        .filter(|p| *p <= MAX_DECIMAL_PLACES)
        .ok_or_else(|| SettingError {
            key: keys::DECIMAL_PLACES.to_string(),
            expected: "integer between 0 and 99",
            found: places.into(),
        })
}

/// Insert `,` every three digits of the integer part
fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn format_number(v: f64, config: &TypeDisplayConfig) -> Result<String, FormatError> {
    let places = decimal_places(config)?;
    let grouped = settings::bool_or(config, keys::USE_THOUSANDS_SEPARATOR, true)?;
    let unit = settings::str_or(config, keys::UNIT, "")?;

    let mut fixed = format!("{:.*}", places, v);
    // "-0.00" reads as a sign with no magnitude
    if fixed.starts_with('-') && fixed[1..].chars().all(|c| c == '0' || c == '.') {
        fixed.remove(0);
    }
    let text = if grouped { group_thousands(&fixed) } else { fixed };

    if unit.is_empty() {
        Ok(text)
    } else {
        Ok(format!("{} {}", text, unit))
    }
}

impl ValueFormatter for NumberFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Int(i) => format_number(*i as f64, config),
            Value::Float(f) => format_number(*f, config),
            other => Err(FormatError::TypeMismatch {
                display_type: DisplayType::Number,
                found: format!("{:?}", other),
            }),
        }
    }

    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        let unit = settings::str_or(config, keys::UNIT, "")?;
        let mut body = text.trim();
        if !unit.is_empty() {
            body = body.strip_suffix(unit).unwrap_or(body).trim_end();
        }
        let digits: String = body.chars().filter(|c| *c != ',').collect();

        let number: f64 = digits
            .parse()
            .map_err(|_| ParseError::invalid(DisplayType::Number, text, "not a number"))?;
        if !number.is_finite() {
            return Err(ParseError::invalid(DisplayType::Number, text, "not a finite number"));
        }

        let min = settings::opt_f64(config, keys::MIN_VALUE)?;
        let max = settings::opt_f64(config, keys::MAX_VALUE)?;
        if min.is_some_and(|lo| number < lo) || max.is_some_and(|hi| number > hi) {
            return Err(ParseError::OutOfRange {
                value: number,
                min,
                max,
            });
        }

        if builtin::is_integer(&config.type_name) {
            if number.fract() != 0.0 || number >= i64::MAX as f64 || number < i64::MIN as f64 {
                return Err(ParseError::invalid(
                    DisplayType::Number,
                    text,
                    format!("not a whole {}", config.type_name),
                ));
            }
            return Ok(Value::Int(number as i64));
        }
        Ok(Value::Float(number))
    }
}
