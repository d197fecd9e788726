use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The CSV table holding the samples to evaluate.
///
/// Each row holds `x_size` features followed by `y_size` reference outputs, the latter
/// being the predictions the training library produced for that row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub path: PathBuf,
    pub x_size: usize,
    #[serde(default)]
    pub y_size: usize,
    #[serde(default = "has_header")]
    pub header: bool,
}

/// The `Tolerance` used when comparing outputs, unset fields taking the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToleranceSpec {
    #[serde(default)]
    pub relative: Option<f64>,
    #[serde(default)]
    pub absolute: Option<f64>,
}

/// A verification run: which network to load, which samples to feed it and how strict to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifySpec {
    pub model: PathBuf,
    pub dataset: DatasetSpec,
    #[serde(default)]
    pub tolerance: ToleranceSpec,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub parallel: bool,
}

fn has_header() -> bool {
    true
}
