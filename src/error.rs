use std::{error::Error, fmt, io, path::PathBuf};

use machine_learning::MlErr;

/// The result type used across the verification harness.
pub type Result<T> = std::result::Result<T, EvalErr>;

/// Everything that can go wrong while loading a model and its samples and evaluating them.
#[derive(Debug)]
pub enum EvalErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Exchange(exchange::Error),
    Ml(MlErr),
    /// A CSV line that can't be read as a row of numbers.
    Table {
        line: usize,
        msg: String,
    },
    /// The table doesn't have the columns the run was configured with.
    Columns {
        got: usize,
        expected: usize,
    },
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErr::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            EvalErr::Exchange(e) => write!(f, "{e}"),
            EvalErr::Ml(e) => write!(f, "{e}"),
            EvalErr::Table { line, msg } => write!(f, "table line {line}: {msg}"),
            EvalErr::Columns { got, expected } => {
                write!(f, "table has {got} columns, expected {expected}")
            }
        }
    }
}

impl Error for EvalErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EvalErr::Io { source, .. } => Some(source),
            EvalErr::Exchange(e) => Some(e),
            EvalErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<exchange::Error> for EvalErr {
    fn from(value: exchange::Error) -> Self {
        Self::Exchange(value)
    }
}

impl From<MlErr> for EvalErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}
