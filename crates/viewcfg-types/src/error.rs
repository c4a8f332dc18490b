use std::fmt;

/// Result type for viewcfg-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width/height string is not `Auto`, a `*` weight or a number
    InvalidLength(String),

    /// Symbolic name does not match any member of the named enumeration
    UnknownVariant { kind: &'static str, name: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength(raw) => write!(f, "Invalid length: {:?}", raw),
            Error::UnknownVariant { kind, name } => write!(f, "Unknown {}: {:?}", kind, name),
        }
    }
}

impl std::error::Error for Error {}
