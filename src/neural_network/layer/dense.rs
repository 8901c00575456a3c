use super::*;

/// Dense (fully connected) layer: `activation(input · kernel + bias)`
///
/// The layer is applied to the last axis of its input, so a `[batch, features]` input gives a
/// `[batch, units]` output and a `[batch, steps, features]` input gives `[batch, steps, units]`.
///
/// # Fields
///
/// - `input_dim` - Size of the last input axis
/// - `output_dim` - Number of units
/// - `weights` - Kernel with shape (input_dim, output_dim)
/// - `bias` - Bias with shape (1, output_dim)
/// - `activation` - Activation applied to the affine output
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::{Array, array};
///
/// let dense = Dense::from_weights(
///     array![[1.0, -1.0], [0.5, 2.0]],
///     array![0.0, 1.0],
///     Activation::Linear,
/// ).unwrap();
///
/// let x = array![[2.0, 4.0]].into_dyn();
/// let y = dense.forward(&x).unwrap();
/// assert_eq!(y, array![[4.0, 7.0]].into_dyn());
/// ```
pub struct Dense {
    input_dim: usize,
    output_dim: usize,
    weights: Array2<f32>,
    bias: Array2<f32>,
    activation: Activation,
}

impl Dense {
    /// Creates a dense layer with Glorot-uniform kernel and zero bias
    ///
    /// # Parameters
    ///
    /// - `input_dim` - Size of the last input axis
    /// - `output_dim` - Number of units
    /// - `activation` - Activation applied to the output
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - The new layer
    /// - `Err(ModelError::InvalidArgument)` - If a dimension is 0
    pub fn new(input_dim: usize, output_dim: usize, activation: Activation) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(output_dim, "output_dim")?;

        Ok(Self {
            input_dim,
            output_dim,
            weights: glorot_uniform(input_dim, output_dim),
            bias: Array2::zeros((1, output_dim)),
            activation,
        })
    }

    /// Creates a dense layer from trained weights
    ///
    /// # Parameters
    ///
    /// - `kernel` - Kernel with shape (input_dim, output_dim)
    /// - `bias` - Bias with shape (output_dim)
    /// - `activation` - Activation applied to the output
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - The layer
    /// - `Err(ModelError::InvalidArgument)` - If the kernel is empty or the bias length does not match
    pub fn from_weights(kernel: Array2<f32>, bias: Array1<f32>, activation: Activation) -> Result<Self, ModelError> {
        let (input_dim, output_dim) = kernel.dim();
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(output_dim, "output_dim")?;
        validate_weight_shape(bias.shape(), &[output_dim], "dense bias")?;

        Ok(Self {
            input_dim,
            output_dim,
            weights: kernel,
            bias: bias.insert_axis(Axis(0)),
            activation,
        })
    }

    /// Returns the input dimension of the layer
    pub fn get_input_dim(&self) -> usize {
        self.input_dim
    }

    /// Returns the number of units
    pub fn get_output_dim(&self) -> usize {
        self.output_dim
    }

    /// Returns the activation function of the layer
    pub fn get_activation(&self) -> Activation {
        self.activation
    }
}

impl Layer for Dense {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        let shape = input.shape();
        if shape.len() < 2 || shape[shape.len() - 1] != self.input_dim {
            return Err(ModelError::InvalidArgument(format!(
                "Dense expects input with last dimension {}, got shape {:?}",
                self.input_dim, shape
            )));
        }

        // Collapse the leading axes so the affine map is a single matrix product
        let rows: usize = shape[..shape.len() - 1].iter().product();
        let input_2d = input
            .to_shape((rows, self.input_dim))
            .map_err(|e| ModelError::ProcessingError(format!("Dense reshape failed: {}", e)))?;

        let mut z = input_2d.dot(&self.weights) + &self.bias;
        Activation::apply_activation_inplace(&mut z, &self.activation);

        let mut out_shape = shape[..shape.len() - 1].to_vec();
        out_shape.push(self.output_dim);
        z.into_shape_with_order(IxDyn(&out_shape))
            .map_err(|e| ModelError::ProcessingError(format!("Dense reshape failed: {}", e)))
    }

    fn layer_type(&self) -> &str {
        "Dense"
    }

    fn output_shape(&self) -> String {
        format!("(None, {})", self.output_dim)
    }

    fn param_count(&self) -> usize {
        // Parameter count = number of weight parameters + number of bias parameters
        self.input_dim * self.output_dim + self.output_dim
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Dense(DenseLayerWeight {
            weight: &self.weights,
            bias: &self.bias,
        })
    }
}
