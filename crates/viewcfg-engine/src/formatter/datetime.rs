use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use std::fmt::Write;
use viewcfg_types::{DateTimeKind, DateTimeValue, DisplayType, TypeDisplayConfig, Value, keys};

use super::{ValueFormatter, pattern};
use crate::error::{FormatError, ParseError};
use crate::settings;

pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";
const DATE_ONLY_FORMAT: &str = "yyyy-MM-dd";

/// Zone used when converting between UTC and local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The machine's zone, including daylight saving transitions
    #[default]
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            LocalZone::System => Local.offset_from_utc_datetime(utc).fix(),
            LocalZone::Fixed(offset) => *offset,
        }
    }

    fn offset_at_local(&self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            // Ambiguous or skipped local times resolve to the earliest valid offset
            LocalZone::System => Local
                .offset_from_local_datetime(local)
                .earliest()
                .map(|o| o.fix())
                .unwrap_or_else(|| Local.offset_from_utc_datetime(local).fix()),
            LocalZone::Fixed(offset) => *offset,
        }
    }

    pub fn utc_to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        let offset = self.offset_at_utc(&utc);
        utc + Duration::seconds(i64::from(offset.local_minus_utc()))
    }

    pub fn local_to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        let offset = self.offset_at_local(&local);
        local - Duration::seconds(i64::from(offset.local_minus_utc()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeFormatter {
    zone: LocalZone,
}

impl DateTimeFormatter {
    pub fn new(zone: LocalZone) -> Self {
        Self { zone }
    }

    /// Effective strftime pattern after `ShowTime`/`ShowSeconds`
    fn effective_pattern(config: &TypeDisplayConfig) -> Result<String, FormatError> {
        let show_time = settings::bool_or(config, keys::SHOW_TIME, true)?;
        let show_seconds = settings::bool_or(config, keys::SHOW_SECONDS, true)?;
        let format = settings::str_or(config, keys::FORMAT, DEFAULT_DATE_FORMAT)?;

        let custom = if !show_time {
            DATE_ONLY_FORMAT.to_string()
        } else if !show_seconds {
            format.replace(":ss", "")
        } else {
            format.to_string()
        };
        pattern::to_strftime(&custom)
    }

    fn to_target(&self, dt: &DateTimeValue, use_local: bool) -> NaiveDateTime {
        match (use_local, dt.kind) {
            (true, DateTimeKind::Utc) => self.zone.utc_to_local(dt.value),
            (false, DateTimeKind::Local) => self.zone.local_to_utc(dt.value),
            _ => dt.value,
        }
    }
}

impl ValueFormatter for DateTimeFormatter {
    fn format(&self, value: &Value, config: &TypeDisplayConfig) -> Result<String, FormatError> {
        let dt = match value {
            Value::Null => return Ok(String::new()),
            Value::DateTime(dt) => dt,
            other => {
                return Err(FormatError::TypeMismatch {
                    display_type: DisplayType::DateTime,
                    found: format!("{:?}", other),
                });
            }
        };

        let use_local = settings::bool_or(config, keys::USE_LOCAL_TIME, true)?;
        let strftime = Self::effective_pattern(config)?;
        let items: Vec<Item<'_>> = StrftimeItems::new(&strftime).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::Pattern(strftime));
        }

        let target = self.to_target(dt, use_local);
        let mut out = String::new();
        write!(out, "{}", target.format_with_items(items.iter()))
            .map_err(|_| FormatError::Pattern(strftime.clone()))?;
        Ok(out)
    }

    /// The parsed value is recorded in the display's clock: `Local` when
    /// `UseLocalTime` is on, `Utc` otherwise.
    fn parse(&self, text: &str, config: &TypeDisplayConfig) -> Result<Value, ParseError> {
        let use_local = settings::bool_or(config, keys::USE_LOCAL_TIME, true)?;
        let strftime = Self::effective_pattern(config).map_err(|e| {
            ParseError::invalid(DisplayType::DateTime, text, e.to_string())
        })?;

        let input = text.trim();
        let naive = if pattern::has_time(&strftime) {
            NaiveDateTime::parse_from_str(input, &strftime)
        } else {
            NaiveDate::parse_from_str(input, &strftime).map(|d| d.and_time(NaiveTime::MIN))
        }
        .map_err(|e| ParseError::invalid(DisplayType::DateTime, text, e.to_string()))?;

        let kind = if use_local {
            DateTimeKind::Local
        } else {
            DateTimeKind::Utc
        };
        Ok(Value::DateTime(DateTimeValue::new(naive, kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn config(use_local: bool) -> TypeDisplayConfig {
        TypeDisplayConfig::new(DisplayType::DateTime)
            .with(keys::FORMAT, DEFAULT_DATE_FORMAT)
            .with(keys::SHOW_TIME, true)
            .with(keys::SHOW_SECONDS, true)
            .with(keys::USE_LOCAL_TIME, use_local)
    }

    fn plus_two() -> DateTimeFormatter {
        DateTimeFormatter::new(LocalZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap()))
    }

    #[test]
    fn test_utc_value_shown_in_local_time() {
        let value = Value::DateTime(DateTimeValue::utc(at(2024, 3, 1, 10, 30, 15)));
        assert_eq!(plus_two().format(&value, &config(true)).unwrap(), "2024-03-01 12:30:15");
    }

    #[test]
    fn test_local_value_shown_in_utc() {
        let value = Value::DateTime(DateTimeValue::local(at(2024, 3, 1, 1, 0, 0)));
        assert_eq!(plus_two().format(&value, &config(false)).unwrap(), "2024-02-29 23:00:00");
    }

    #[test]
    fn test_matching_kind_is_not_converted() {
        let value = Value::DateTime(DateTimeValue::utc(at(2024, 3, 1, 10, 0, 0)));
        assert_eq!(plus_two().format(&value, &config(false)).unwrap(), "2024-03-01 10:00:00");
        let unspecified = Value::DateTime(DateTimeValue::new(at(2024, 3, 1, 10, 0, 0), DateTimeKind::Unspecified));
        assert_eq!(plus_two().format(&unspecified, &config(true)).unwrap(), "2024-03-01 10:00:00");
    }

    #[test]
    fn test_show_time_and_seconds() {
        let value = Value::DateTime(DateTimeValue::local(at(2024, 3, 1, 10, 30, 15)));
        let no_seconds = config(true).with(keys::SHOW_SECONDS, false);
        assert_eq!(plus_two().format(&value, &no_seconds).unwrap(), "2024-03-01 10:30");
        let no_time = config(true).with(keys::SHOW_TIME, false);
        assert_eq!(plus_two().format(&value, &no_time).unwrap(), "2024-03-01");
    }

    #[test]
    fn test_roundtrip_keeps_kind_of_display_clock() {
        let formatter = plus_two();
        for use_local in [true, false] {
            let config = config(use_local);
            let original = if use_local {
                DateTimeValue::local(at(2023, 12, 31, 23, 59, 58))
            } else {
                DateTimeValue::utc(at(2023, 12, 31, 23, 59, 58))
            };
            let text = formatter.format(&Value::DateTime(original), &config).unwrap();
            assert_eq!(formatter.parse(&text, &config).unwrap(), Value::DateTime(original));
        }
    }

    #[test]
    fn test_parse_date_only() {
        let config = config(true).with(keys::SHOW_TIME, false);
        assert_eq!(
            plus_two().parse("2024-03-01", &config).unwrap(),
            Value::DateTime(DateTimeValue::local(at(2024, 3, 1, 0, 0, 0)))
        );
        assert!(plus_two().parse("01/03/2024", &config).is_err());
    }

    #[test]
    fn test_bad_pattern_is_a_format_error() {
        let value = Value::DateTime(DateTimeValue::local(at(2024, 3, 1, 0, 0, 0)));
        let config = config(true).with(keys::FORMAT, "yyyy 'broken");
        assert!(matches!(plus_two().format(&value, &config), Err(FormatError::Pattern(_))));
    }
}
