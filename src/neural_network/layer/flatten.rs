use super::*;

/// Layer that flattens every sample into a vector
///
/// Input shape is `[batch_size, d1, d2, ...]`, output shape is `[batch_size, d1 * d2 * ...]`.
/// Typically sits between an `Embedding` and a `Dense` layer.
///
/// # Example
///
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::{Array, IxDyn};
///
/// let x = Array::ones(IxDyn(&[2, 5, 4]));
/// let flattened = Flatten::new().forward(&x).unwrap();
/// assert_eq!(flattened.shape(), &[2, 20]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Flatten;

impl Flatten {
    /// Creates a new `Flatten` layer
    pub fn new() -> Self {
        Flatten
    }
}

impl Layer for Flatten {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        if input.ndim() < 2 {
            return Err(ModelError::InvalidArgument(format!(
                "Flatten expects at least a 2D input tensor, got shape {:?}",
                input.shape()
            )));
        }

        let batch_size = input.shape()[0];
        let features: usize = input.shape()[1..].iter().product();

        // Reshape only changes the view when the input is standard layout
        let flattened = input
            .to_shape(IxDyn(&[batch_size, features]))
            .map_err(|e| ModelError::ProcessingError(format!("Flatten reshape failed: {}", e)))?;

        Ok(flattened.into_owned())
    }

    fn layer_type(&self) -> &str {
        "Flatten"
    }

    fn output_shape(&self) -> String {
        "(None, ?)".to_string()
    }
}
