use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// Structural incompatibility between an input and a layer, inside a layer or between
    /// adjacent layers.
    DimensionMismatch {
        what: &'static str,
        layer: Option<usize>,
        got: usize,
        expected: usize,
    },
    UnsupportedActivation {
        name: String,
    },
    EmptyNetwork,
}

impl MlErr {
    pub(crate) fn mismatch(what: &'static str, got: usize, expected: usize) -> Self {
        Self::DimensionMismatch {
            what,
            layer: None,
            got,
            expected,
        }
    }

    /// Attaches the index of the layer the error originated in, if it has none yet.
    pub(crate) fn at_layer(self, i: usize) -> Self {
        match self {
            Self::DimensionMismatch {
                what,
                layer: None,
                got,
                expected,
            } => Self::DimensionMismatch {
                what,
                layer: Some(i),
                got,
                expected,
            },
            other => other,
        }
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::DimensionMismatch {
                what,
                layer: Some(i),
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what} at layer {i}: got {got}, expected {expected}"
            ),
            MlErr::DimensionMismatch {
                what,
                layer: None,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            MlErr::UnsupportedActivation { name } => {
                write!(f, "unsupported activation function '{name}'")
            }
            MlErr::EmptyNetwork => write!(f, "a network must have at least one layer"),
        }
    }
}

impl Error for MlErr {}
