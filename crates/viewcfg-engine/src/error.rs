use std::fmt;

use viewcfg_types::{DisplayType, SettingValue};

/// Result type for viewcfg-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// A setting was present but held the wrong kind of value
#[derive(Debug, Clone, PartialEq)]
pub struct SettingError {
    pub key: String,
    pub expected: &'static str,
    pub found: SettingValue,
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Setting {} expects {}, found {} ({})",
            self.key,
            self.expected,
            self.found.kind(),
            self.found
        )
    }
}

impl std::error::Error for SettingError {}

/// Formatting failed; display paths degrade to a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Value variant does not fit the display type
    TypeMismatch {
        display_type: DisplayType,
        found: String,
    },

    /// Settings bag holds a wrongly-typed entry
    Setting(SettingError),

    /// Date/time pattern could not be translated
    Pattern(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TypeMismatch {
                display_type,
                found,
            } => write!(f, "Cannot format {} as {}", found, display_type),
            FormatError::Setting(err) => write!(f, "{}", err),
            FormatError::Pattern(msg) => write!(f, "Invalid date format: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Setting(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingError> for FormatError {
    fn from(err: SettingError) -> Self {
        FormatError::Setting(err)
    }
}

/// Text could not be turned back into a value
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Invalid {
        display_type: DisplayType,
        input: String,
        reason: String,
    },

    /// Parsed number falls outside `MinValue`/`MaxValue`
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    Setting(SettingError),
}

impl ParseError {
    pub(crate) fn invalid(display_type: DisplayType, input: &str, reason: impl Into<String>) -> Self {
        ParseError::Invalid {
            display_type,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Invalid {
                display_type,
                input,
                reason,
            } => write!(f, "Cannot parse {:?} as {}: {}", input, display_type, reason),
            ParseError::OutOfRange { value, min, max } => {
                write!(f, "Value {} is out of range", value)?;
                match (min, max) {
                    (Some(lo), Some(hi)) => write!(f, " [{}, {}]", lo, hi),
                    (Some(lo), None) => write!(f, " (minimum {})", lo),
                    (None, Some(hi)) => write!(f, " (maximum {})", hi),
                    (None, None) => Ok(()),
                }
            }
            ParseError::Setting(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Setting(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingError> for ParseError {
    fn from(err: SettingError) -> Self {
        ParseError::Setting(err)
    }
}

/// A configuration document is structurally or semantically unusable
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Type named by the document is not known to the catalog
    UnresolvableType { type_name: String, assembly: String },

    /// Schema version is not understood
    UnsupportedVersion(String),

    InvalidMaxDepth(u32),

    DuplicateMode(String),

    /// Map key and the entry's own property path disagree
    PathMismatch { key: String, property_path: String },

    /// Property path does not exist on the type
    UnknownProperty { type_name: String, property_path: String },

    InvalidLength {
        property_path: String,
        mode: String,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnresolvableType {
                type_name,
                assembly,
            } => write!(f, "Cannot resolve type {}, {}", type_name, assembly),
            ValidationError::UnsupportedVersion(v) => write!(f, "Unsupported version: {}", v),
            ValidationError::InvalidMaxDepth(d) => write!(f, "MaxDepth must be at least 1, got {}", d),
            ValidationError::DuplicateMode(mode) => write!(f, "Display mode listed twice: {}", mode),
            ValidationError::PathMismatch { key, property_path } => write!(
                f,
                "Property key {:?} does not match its path {:?}",
                key, property_path
            ),
            ValidationError::UnknownProperty {
                type_name,
                property_path,
            } => write!(f, "Type {} has no property {}", type_name, property_path),
            ValidationError::InvalidLength {
                property_path,
                mode,
                value,
            } => write!(
                f,
                "Invalid length {:?} for {} in {} mode",
                value, property_path, mode
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// An edit could not be applied to a config
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    UnknownProperty(String),

    /// Mode is not in the config's supported set
    UnsupportedMode(String),

    /// New value has the wrong kind for the edited field
    InvalidValue { target: String, reason: String },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownProperty(path) => write!(f, "Unknown property: {}", path),
            EditError::UnsupportedMode(mode) => write!(f, "Display mode not supported: {}", mode),
            EditError::InvalidValue { target, reason } => {
                write!(f, "Invalid value for {}: {}", target, reason)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    Format(FormatError),
    Parse(ParseError),
    Validation(ValidationError),
    Edit(EditError),

    /// Type catalog document could not be read
    Catalog(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(err) => write!(f, "Format error: {}", err),
            Error::Parse(err) => write!(f, "Parse error: {}", err),
            Error::Validation(err) => write!(f, "Validation error: {}", err),
            Error::Edit(err) => write!(f, "Edit error: {}", err),
            Error::Catalog(err) => write!(f, "Catalog error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Validation(err) => Some(err),
            Error::Edit(err) => Some(err),
            Error::Catalog(err) => Some(err),
        }
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        Error::Edit(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(err)
    }
}
