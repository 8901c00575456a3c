use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::layer::LayerWeight;

/// Defines the interface for neural network layers.
///
/// Layers are inference-only: they hold weights loaded from exported artifacts (or freshly
/// initialized ones) and transform an input tensor into an output tensor. `forward` takes
/// `&self`, so a built model can be shared between threads.
pub trait Layer: Send + Sync {
    /// Performs forward propagation through the layer.
    ///
    /// # Parameters
    ///
    /// * `input` - The input tensor to the layer
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - The output tensor after forward computation
    /// - `Err(ModelError::InvalidArgument)` - If the input does not have the shape or values the layer expects
    /// - `Err(ModelError::ProcessingError)` - If the computation itself failed
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError>;

    /// Returns the type name of the layer (e.g., "Dense").
    ///
    /// # Returns
    ///
    /// A string slice representing the layer type
    fn layer_type(&self) -> &str {
        "Unknown"
    }

    /// Returns a description of the output shape of the layer.
    ///
    /// # Returns
    ///
    /// A string describing the output dimensions, `None` standing for the batch dimension
    fn output_shape(&self) -> String {
        "Unknown".to_string()
    }

    /// Returns the total number of parameters in the layer.
    ///
    /// # Returns
    ///
    /// The count of parameters as an usize
    fn param_count(&self) -> usize {
        0
    }

    /// Returns references to the weights of the layer.
    ///
    /// # Returns
    ///
    /// A `LayerWeight` borrowing the layer's weight arrays, `LayerWeight::Empty` for layers
    /// without parameters
    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Empty
    }
}
