use log::trace;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

use crate::{MlErr, Result, arch::Network};

/// Reproduces a trained network's output from its raw parameters.
///
/// Evaluation is a pure function of the network and the input: nothing is cached between calls
/// and the network is only ever read, so a single network can be evaluated from many threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEvaluator;

impl ForwardEvaluator {
    /// Creates a new `ForwardEvaluator`.
    pub fn new() -> Self {
        Self
    }

    /// Makes a forward pass through the network for a single sample.
    ///
    /// # Arguments
    /// * `network` - The trained network.
    /// * `x` - The input vector, of length `network.input_dim()`.
    ///
    /// # Returns
    /// The output vector, of length `network.output_dim()`, or a `DimensionMismatch` if the
    /// input has the wrong length.
    pub fn evaluate(&self, network: &Network, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        if x.len() != network.input_dim() {
            return Err(MlErr::mismatch("input", x.len(), network.input_dim()));
        }

        let mut a = x.to_owned();
        for (i, layer) in network.layers().iter().enumerate() {
            trace!(
                "layer {i}: {} -> {} ({})",
                layer.input_dim(),
                layer.output_dim(),
                layer.act_fn()
            );
            a = layer.forward(a.view()).map_err(|e| e.at_layer(i))?;
        }

        Ok(a)
    }

    /// Makes a forward pass through the network for a batch of samples.
    ///
    /// # Arguments
    /// * `network` - The trained network.
    /// * `x` - The input matrix, one sample per row.
    ///
    /// # Returns
    /// The outputs, one row per sample, or a `DimensionMismatch` if `x` has the wrong amount of
    /// columns.
    pub fn evaluate_batch(&self, network: &Network, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != network.input_dim() {
            return Err(MlErr::mismatch("input", x.ncols(), network.input_dim()));
        }

        let mut a = x.to_owned();
        for (i, layer) in network.layers().iter().enumerate() {
            a = layer.forward_batch(a.view()).map_err(|e| e.at_layer(i))?;
        }

        trace!("evaluated a batch of {} samples", a.nrows());
        Ok(a)
    }

    /// Same as `evaluate_batch`, but the rows are evaluated in parallel, each one with
    /// `evaluate`.
    pub fn par_evaluate_batch(
        &self,
        network: &Network,
        x: ArrayView2<f64>,
    ) -> Result<Array2<f64>> {
        if x.ncols() != network.input_dim() {
            return Err(MlErr::mismatch("input", x.ncols(), network.input_dim()));
        }

        let outputs: Vec<Array1<f64>> = x
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| self.evaluate(network, row))
            .collect::<Result<_>>()?;

        let mut y = Array2::zeros((x.nrows(), network.output_dim()));
        for (mut row, output) in y.rows_mut().into_iter().zip(&outputs) {
            row.assign(output);
        }

        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::arch::{
        activations::ActFn,
        layers::{Dense, WeightLayout},
    };

    fn two_layer_net() -> Network {
        let l1 = Dense::new(
            array![[1., 0.], [0., 1.]],
            array![0., 0.],
            ActFn::relu(),
            WeightLayout::InputMajor,
        )
        .unwrap();
        let l2 = Dense::new(
            array![[1.], [1.]],
            array![0.],
            ActFn::identity(),
            WeightLayout::InputMajor,
        )
        .unwrap();

        Network::new([l1, l2]).unwrap()
    }

    #[test]
    fn relu_zeroes_the_negative_feature() {
        let net = two_layer_net();
        let y = ForwardEvaluator::new()
            .evaluate(&net, array![3., -2.].view())
            .unwrap();

        assert_eq!(y, array![3.]);
    }

    #[test]
    fn rejects_inputs_of_the_wrong_length() {
        let net = two_layer_net();
        let err = ForwardEvaluator::new()
            .evaluate(&net, array![3., -2., 1.].view())
            .unwrap_err();

        assert_eq!(err, MlErr::mismatch("input", 3, 2));
    }

    #[test]
    fn batch_rejects_inputs_of_the_wrong_width() {
        let net = two_layer_net();
        let x = Array2::zeros((4, 3));

        assert!(ForwardEvaluator::new().evaluate_batch(&net, x.view()).is_err());
        assert!(ForwardEvaluator::new().par_evaluate_batch(&net, x.view()).is_err());
    }

    #[test]
    fn empty_batches_yield_empty_outputs() {
        let net = two_layer_net();
        let x = Array2::zeros((0, 2));
        let y = ForwardEvaluator::new().par_evaluate_batch(&net, x.view()).unwrap();
        assert_eq!(y.dim(), (0, 1));
    }
}
