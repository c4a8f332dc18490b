use std::fmt;

use viewcfg_engine::{EditError, FormatError, ParseError, ValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    Validation(ValidationError),
    Format(FormatError),
    Parse(ParseError),
    Edit(EditError),
    Storage(viewcfg_runtime::Error),
    Internal(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Validation(err) => write!(f, "Validation failed: {}", err),
            Error::Format(err) => write!(f, "Format failed: {}", err),
            Error::Parse(err) => write!(f, "Parse failed: {}", err),
            Error::Edit(err) => write!(f, "Edit rejected: {}", err),
            Error::Storage(err) => write!(f, "Storage error: {}", err),
            Error::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(err) => Some(err),
            Error::Format(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Edit(err) => Some(err),
            Error::Storage(err) => Some(err),
            Error::Internal(err) => Some(err.as_ref()),
            Error::NotFound(_) => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
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

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        Error::Edit(err)
    }
}

// Validation failures keep their own variant whichever layer reports them
impl From<viewcfg_runtime::Error> for Error {
    fn from(err: viewcfg_runtime::Error) -> Self {
        match err {
            viewcfg_runtime::Error::Validation(err) => Error::Validation(err),
            other => Error::Storage(other),
        }
    }
}
