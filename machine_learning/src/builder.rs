use exchange::specs::{LayerSpec, NetworkSpec};
use log::debug;
use ndarray::{Array1, Array2};

use crate::{
    MlErr, Result,
    arch::{
        Network,
        activations::ActFn,
        layers::{Dense, WeightLayout},
    },
};

/// Builds `Network`s from the parameters a training library exported.
#[derive(Default)]
pub struct NetworkBuilder;

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Network` from its exported description.
    ///
    /// # Arguments
    /// * `spec` - The exported layers or perceptron.
    ///
    /// # Returns
    /// The network, or the first structural or activation error found.
    pub fn build(&self, spec: &NetworkSpec) -> Result<Network> {
        let network = match spec {
            NetworkSpec::Sequential { layers } => self.resolve_sequential(layers),
            NetworkSpec::Mlp {
                coefs,
                intercepts,
                activation,
                out_activation,
            } => self.resolve_mlp(coefs, intercepts, activation, out_activation),
        }?;

        debug!(
            "built a network with dims {:?} and {} parameters",
            network.dims(),
            network.size()
        );
        Ok(network)
    }

    fn resolve_sequential(&self, specs: &[LayerSpec]) -> Result<Network> {
        let layers = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| self.resolve_layer(spec).map_err(|e| e.at_layer(i)))
            .collect::<Result<Vec<_>>>()?;

        Network::new(layers)
    }

    fn resolve_layer(&self, spec: &LayerSpec) -> Result<Dense> {
        match spec {
            LayerSpec::Dense {
                weights,
                biases,
                act_fn,
                layout,
            } => {
                let act_fn = self.resolve_act_fn(act_fn.as_deref())?;
                let weights = self.resolve_matrix(weights)?;
                let biases = Array1::from(biases.clone());
                Dense::new(weights, biases, act_fn, (*layout).into())
            }
        }
    }

    /// The hidden layers use `activation` and the last one `out_activation`, the same way
    /// scikit-learn's perceptrons do.
    fn resolve_mlp(
        &self,
        coefs: &[Vec<Vec<f64>>],
        intercepts: &[Vec<f64>],
        activation: &str,
        out_activation: &str,
    ) -> Result<Network> {
        if coefs.len() != intercepts.len() {
            return Err(MlErr::mismatch("intercepts", intercepts.len(), coefs.len()));
        }

        let hidden = self.resolve_act_fn(Some(activation))?;
        let out = self.resolve_act_fn(Some(out_activation))?;
        let last = coefs.len().saturating_sub(1);

        let layers = coefs
            .iter()
            .zip(intercepts)
            .enumerate()
            .map(|(i, (w, b))| {
                let act_fn = if i == last { out } else { hidden };
                let weights = self.resolve_matrix(w)?;
                let biases = Array1::from(b.clone());
                Dense::new(weights, biases, act_fn, WeightLayout::InputMajor)
                    .map_err(|e| e.at_layer(i))
            })
            .collect::<Result<Vec<_>>>()?;

        Network::new(layers)
    }

    fn resolve_act_fn(&self, name: Option<&str>) -> Result<ActFn> {
        let Some(name) = name else {
            return Ok(ActFn::identity());
        };

        name.parse()
    }

    fn resolve_matrix(&self, rows: &[Vec<f64>]) -> Result<Array2<f64>> {
        let ncols = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
            return Err(MlErr::mismatch("weight row", row.len(), ncols));
        }

        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        let len = data.len();
        Array2::from_shape_vec((rows.len(), ncols), data)
            .map_err(|_| MlErr::mismatch("weights", len, rows.len() * ncols))
    }
}
