use super::layers::Dense;
use crate::{MlErr, Result};

/// A trained feed-forward network: information flows through its layers in order, the output of
/// each one being the input of the next.
///
/// The layer dimensions are validated when the network is built, so a `Network` is always
/// structurally sound and read-only from then on.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    layers: Vec<Dense>,
}

impl Network {
    /// Creates a new `Network`.
    ///
    /// # Arguments
    /// * `layers` - The layers the network is composed of, in evaluation order.
    ///
    /// # Returns
    /// A new `Network` instance, `EmptyNetwork` if there are no layers or a `DimensionMismatch`
    /// naming the first layer whose input doesn't match its predecessor's output.
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Dense>,
    {
        let layers: Vec<_> = layers.into_iter().collect();

        if layers.is_empty() {
            return Err(MlErr::EmptyNetwork);
        }

        for (i, pair) in layers.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.output_dim() != next.input_dim() {
                return Err(
                    MlErr::mismatch("layer input", next.input_dim(), prev.output_dim())
                        .at_layer(i + 1),
                );
            }
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// Returns the amount of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Never true for a built network.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the amount of features an input vector must have.
    pub fn input_dim(&self) -> usize {
        self.layers[0].input_dim()
    }

    /// Returns the length of the output vector.
    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].output_dim()
    }

    /// Returns the amount of parameters in the network.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Dense::size).sum()
    }

    /// Returns the layer sizes, starting with the input dimension.
    pub fn dims(&self) -> Vec<usize> {
        let mut dims = vec![self.input_dim()];
        dims.extend(self.layers.iter().map(Dense::output_dim));
        dims
    }
}
