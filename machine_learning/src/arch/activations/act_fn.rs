use std::{fmt, str::FromStr};

use super::{Relu, Sigmoid};
use crate::MlErr;

/// The element-wise non-linearity applied after a layer's linear transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActFn {
    #[default]
    Identity,
    Rectified(Relu),
    Logistic(Sigmoid),
}
use ActFn::*;

impl ActFn {
    pub fn identity() -> Self {
        Identity
    }

    pub fn relu() -> Self {
        Rectified(Relu::new())
    }

    pub fn sigmoid() -> Self {
        Logistic(Sigmoid::new())
    }

    pub fn f(&self, x: f64) -> f64 {
        match self {
            Identity => x,
            Rectified(a) => a.f(x),
            Logistic(a) => a.f(x),
        }
    }

    /// Returns the canonical name of this activation function.
    pub fn name(&self) -> &'static str {
        match self {
            Identity => "identity",
            Rectified(_) => "relu",
            Logistic(_) => "logistic",
        }
    }
}

impl FromStr for ActFn {
    type Err = MlErr;

    /// Parses an activation function by name, accepting the names used by the common
    /// training libraries (`identity`/`linear`, `relu`, `logistic`/`sigmoid`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "linear" => Ok(Self::identity()),
            "relu" => Ok(Self::relu()),
            "logistic" | "sigmoid" => Ok(Self::sigmoid()),
            _ => Err(MlErr::UnsupportedActivation { name: s.into() }),
        }
    }
}

impl fmt::Display for ActFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
