use std::{error, fmt, io, path::PathBuf};

/// The exchange module's result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while reading exchange documents.
#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Error::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
