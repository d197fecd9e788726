use ndarray::prelude::*;

use super::WeightLayout;
use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer holding trained parameters.
///
/// Weights are stored with shape `(input_dim, output_dim)`, so column `i` holds the weights
/// feeding output neuron `i`. The layer is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    weights: Array2<f64>,
    biases: Array1<f64>,
    act_fn: ActFn,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `weights` - The weight matrix, laid out as `layout` says.
    /// * `biases` - One bias per output neuron.
    /// * `act_fn` - The activation applied to the layer's pre-activations.
    /// * `layout` - The orientation of `weights`.
    ///
    /// # Returns
    /// A new `Dense` instance or a `DimensionMismatch` if the biases don't match the amount of
    /// output neurons.
    pub fn new(
        weights: Array2<f64>,
        biases: Array1<f64>,
        act_fn: ActFn,
        layout: WeightLayout,
    ) -> Result<Self> {
        let weights = match layout {
            WeightLayout::InputMajor => weights,
            WeightLayout::OutputMajor => weights.reversed_axes().as_standard_layout().into_owned(),
        };

        if biases.len() != weights.ncols() {
            return Err(MlErr::mismatch("biases", biases.len(), weights.ncols()));
        }

        Ok(Self {
            weights,
            biases,
            act_fn,
        })
    }

    /// Creates a new `Dense` layer from flat, row-major parameter buffers.
    ///
    /// # Arguments
    /// * `dim` - The layer's `(input_dim, output_dim)`.
    /// * `weights` - `input_dim * output_dim` weights in row-major order for `layout`.
    /// * `biases` - `output_dim` biases.
    /// * `act_fn` - The activation applied to the layer's pre-activations.
    /// * `layout` - The orientation of `weights`.
    ///
    /// # Returns
    /// A new `Dense` instance or a `DimensionMismatch` if a buffer has the wrong length.
    pub fn from_raw(
        dim: (usize, usize),
        weights: &[f64],
        biases: &[f64],
        act_fn: ActFn,
        layout: WeightLayout,
    ) -> Result<Self> {
        let weights = ArrayView2::from_shape(layout.shape(dim), weights)
            .map_err(|_| MlErr::mismatch("weights", weights.len(), dim.0 * dim.1))?;

        Self::new(
            weights.to_owned(),
            Array1::from(biases.to_vec()),
            act_fn,
            layout,
        )
    }

    /// Returns the amount of input features this layer expects.
    pub fn input_dim(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns the amount of output neurons of this layer.
    pub fn output_dim(&self) -> usize {
        self.weights.ncols()
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    /// Returns the weights in `(input_dim, output_dim)` orientation.
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn biases(&self) -> ArrayView1<'_, f64> {
        self.biases.view()
    }

    /// Computes this layer's output for a single sample.
    ///
    /// # Arguments
    /// * `x` - The previous layer's output, or the network input for the first layer.
    ///
    /// # Returns
    /// The activated output or a `DimensionMismatch` if `x` has the wrong length.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.input_dim() {
            return Err(MlErr::mismatch("input", x.len(), self.input_dim()));
        }

        let mut z = x.dot(&self.weights);
        z += &self.biases;
        z.mapv_inplace(|z| self.act_fn.f(z));
        Ok(z)
    }

    /// Computes this layer's output for a batch of samples, one per row.
    ///
    /// # Arguments
    /// * `x` - The previous layer's outputs, or the network inputs for the first layer.
    ///
    /// # Returns
    /// The activated outputs or a `DimensionMismatch` if `x` has the wrong amount of columns.
    ///
    /// Every row goes through `forward`, so a row's output does not depend on the batch it
    /// was evaluated in.
    pub fn forward_batch(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.input_dim() {
            return Err(MlErr::mismatch("input", x.ncols(), self.input_dim()));
        }

        let mut z = Array2::zeros((x.nrows(), self.output_dim()));
        for (row, mut out) in x.rows().into_iter().zip(z.rows_mut()) {
            out.assign(&self.forward(row)?);
        }
        Ok(z)
    }
}
