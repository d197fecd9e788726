use serde::{Deserialize, Serialize};

/// How a layer's weight matrix is laid out in the exported document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSpec {
    /// One row per input feature, one column per output neuron.
    #[default]
    InputMajor,
    /// One row per output neuron, one column per input feature.
    OutputMajor,
}

/// A trained layer as exported by the training library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    Dense {
        weights: Vec<Vec<f64>>,
        biases: Vec<f64>,
        #[serde(default)]
        act_fn: Option<String>,
        #[serde(default)]
        layout: LayoutSpec,
    },
}

/// A trained network as exported by the training library.
///
/// `Mlp` mirrors what scikit-learn exposes on a fitted `MLPRegressor` or
/// `MLPClassifier`: `coefs_`, `intercepts_`, `activation` and `out_activation_`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkSpec {
    Sequential {
        layers: Vec<LayerSpec>,
    },
    Mlp {
        coefs: Vec<Vec<Vec<f64>>>,
        intercepts: Vec<Vec<f64>>,
        activation: String,
        #[serde(default = "identity")]
        out_activation: String,
    },
}

fn identity() -> String {
    "identity".into()
}
