use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::activation::Activation;
use crate::traits::Layer;
use ndarray::{Array, Array1, Array2, Array3, Axis, Ix2, Ix3, IxDyn};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// Fully connected layer
pub mod dense;
/// Identity layer standing in for dropout at inference time
pub mod dropout;
/// Token id to dense vector lookup layer
pub mod embedding;
/// Layer that flattens every sample into a vector
pub mod flatten;
/// Global average and max pooling over the steps axis
pub mod global_pooling_1d;
/// Borrowed views of layer weights
pub mod layer_weight;
/// Long Short-Term Memory recurrent layer
pub mod lstm;

pub use dense::*;
pub use dropout::*;
pub use embedding::*;
pub use flatten::*;
pub use global_pooling_1d::*;
pub use layer_weight::*;
pub use lstm::*;

/// Validates that the input tensor has the expected number of dimensions
///
/// # Parameters
///
/// - `input` - Tensor to check
/// - `ndim` - Expected number of dimensions
/// - `layer` - Layer name used in the error message
///
/// # Returns
///
/// - `Ok(())` - If the tensor has `ndim` dimensions
/// - `Err(ModelError::InvalidArgument)` - Otherwise
fn validate_input_ndim(input: &Tensor, ndim: usize, layer: &str) -> Result<(), ModelError> {
    if input.ndim() != ndim {
        return Err(ModelError::InvalidArgument(format!(
            "{} expects a {}D input tensor, got shape {:?}",
            layer,
            ndim,
            input.shape()
        )));
    }
    Ok(())
}

/// Validates that a dimension value is greater than 0
///
/// # Parameters
///
/// - `value` - The dimension value to validate
/// - `name` - The name of the dimension for error messages
fn validate_dimension_greater_than_zero(value: usize, name: &str) -> Result<(), ModelError> {
    if value == 0 {
        return Err(ModelError::InvalidArgument(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}

/// Validates that a weight array has the expected shape
fn validate_weight_shape(actual: &[usize], expected: &[usize], name: &str) -> Result<(), ModelError> {
    if actual != expected {
        return Err(ModelError::InvalidArgument(format!(
            "{} has shape {:?}, expected {:?}",
            name, actual, expected
        )));
    }
    Ok(())
}

/// Glorot/Xavier uniform initialization, the Keras default kernel initializer
fn glorot_uniform(fan_in: usize, fan_out: usize) -> Array2<f32> {
    let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
    Array::random((fan_in, fan_out), Uniform::new(-limit, limit))
}
