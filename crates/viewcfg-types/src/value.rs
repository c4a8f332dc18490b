use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;

/// Which clock a date/time value was recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeKind {
    #[default]
    Unspecified,
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    pub value: NaiveDateTime,
    pub kind: DateTimeKind,
}

impl DateTimeValue {
    pub fn new(value: NaiveDateTime, kind: DateTimeKind) -> Self {
        Self { value, kind }
    }

    pub fn utc(value: NaiveDateTime) -> Self {
        Self::new(value, DateTimeKind::Utc)
    }

    pub fn local(value: NaiveDateTime) -> Self {
        Self::new(value, DateTimeKind::Local)
    }
}

/// Enumeration member as seen by the display layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub member: String,
    /// Human-readable text attached to the member by the host
    pub description: Option<String>,
}

impl EnumValue {
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            description: None,
        }
    }

    pub fn described(member: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            description: Some(description.into()),
        }
    }
}

/// A concrete value handed to the formatters by the host
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(DateTimeValue),
    Enum(EnumValue),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Follow a dot-delimited property path through nested objects.
    ///
    /// Returns `None` when a segment is missing or an intermediate value is
    /// not an object.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }

        let mut current = self;
        for segment in path.split('.') {
            match current {
                Value::Object(fields) => current = fields.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.value.format("%Y-%m-%d %H:%M:%S")),
            Value::Enum(e) => f.write_str(&e.member),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTimeValue> for Value {
    fn from(dt: DateTimeValue) -> Self {
        Value::DateTime(dt)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Value {
        let address: Value = [("City".to_string(), Value::text("Lyon"))].into_iter().collect();
        [
            ("Id".to_string(), Value::Int(7)),
            ("Address".to_string(), address),
            ("Note".to_string(), Value::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_nested() {
        let order = order();
        assert_eq!(order.lookup("Id"), Some(&Value::Int(7)));
        assert_eq!(order.lookup("Address.City"), Some(&Value::text("Lyon")));
        assert_eq!(order.lookup("Note"), Some(&Value::Null));
    }

    #[test]
    fn test_lookup_missing_or_through_scalar() {
        let order = order();
        assert_eq!(order.lookup("Missing"), None);
        assert_eq!(order.lookup("Id.Value"), None);
        assert_eq!(order.lookup("Note.Text"), None);
        assert_eq!(order.lookup(""), None);
    }

    #[test]
    fn test_display_textual_representation() {
        let list = Value::List(vec![Value::Int(1), Value::text("a")]);
        assert_eq!(list.to_string(), "[1, a]");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(order().to_string(), "{Address: {City: Lyon}, Id: 7, Note: }");
    }
}
