/// The orientation of a weight matrix handed to a layer.
///
/// Layers always evaluate with `InputMajor` weights; `OutputMajor` matrices are transposed once
/// when the layer is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightLayout {
    /// Shape `(input_dim, output_dim)`: rows index input features, columns index output
    /// neurons. This is how scikit-learn's `coefs_` and Keras' `Dense` kernels are laid out.
    #[default]
    InputMajor,
    /// Shape `(output_dim, input_dim)`: one row of weights per output neuron, as in PyTorch's
    /// `Linear.weight`.
    OutputMajor,
}

impl WeightLayout {
    /// Returns the shape a matrix in this layout has for a layer of the given dimension.
    ///
    /// # Arguments
    /// * `dim` - The layer's `(input_dim, output_dim)`.
    pub fn shape(&self, (n, m): (usize, usize)) -> (usize, usize) {
        match self {
            WeightLayout::InputMajor => (n, m),
            WeightLayout::OutputMajor => (m, n),
        }
    }
}

impl From<exchange::specs::LayoutSpec> for WeightLayout {
    fn from(value: exchange::specs::LayoutSpec) -> Self {
        match value {
            exchange::specs::LayoutSpec::InputMajor => Self::InputMajor,
            exchange::specs::LayoutSpec::OutputMajor => Self::OutputMajor,
        }
    }
}
