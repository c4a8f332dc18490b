use std::fmt;
use std::path::PathBuf;

use viewcfg_engine::ValidationError;

/// Result type for viewcfg-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Document could not be read or written as JSON
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Document parsed but is not usable
    Validation(ValidationError),

    /// Host options error
    Config(String),

    /// Engine layer error
    Engine(viewcfg_engine::Error),
}

impl Error {
    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Serialization {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Serialization { path, source } => {
                write!(f, "Serialization error in {}: {}", path.display(), source)
            }
            Error::Validation(err) => write!(f, "Validation failed: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Engine(err) => write!(f, "Engine error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serialization { source, .. } => Some(source),
            Error::Validation(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<viewcfg_engine::Error> for Error {
    fn from(err: viewcfg_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
