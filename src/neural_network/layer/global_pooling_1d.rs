use super::*;
use rayon::prelude::*;

/// Number of samples at which pooling is computed sample-parallel
const GLOBAL_POOLING_1D_PARALLEL_THRESHOLD: usize = 32;

/// Global Average Pooling 1D Layer
///
/// Averages over the steps axis. Input shape is `[batch_size, steps, channels]` (channels
/// last, as Keras exports it), output shape is `[batch_size, channels]`.
///
/// This layer has no parameters.
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::{Array, IxDyn};
///
/// let pooling = GlobalAveragePooling1D::new();
/// let input = Array::from_elem(IxDyn(&[2, 4, 3]), 1.0);
/// let output = pooling.forward(&input).unwrap();
/// assert_eq!(output.shape(), &[2, 3]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct GlobalAveragePooling1D;

impl GlobalAveragePooling1D {
    /// Creates a new `GlobalAveragePooling1D` layer.
    pub fn new() -> Self {
        GlobalAveragePooling1D
    }
}

/// Global Max Pooling 1D Layer
///
/// Takes the maximum over the steps axis. Input shape is `[batch_size, steps, channels]`,
/// output shape is `[batch_size, channels]`.
#[derive(Debug, Default, Clone)]
pub struct GlobalMaxPooling1D;

impl GlobalMaxPooling1D {
    /// Creates a new `GlobalMaxPooling1D` layer.
    pub fn new() -> Self {
        GlobalMaxPooling1D
    }
}

/// Reduces the steps axis of a `[batch, steps, channels]` tensor with `reduce`
fn pool_steps<F>(input: &Tensor, layer: &str, reduce: F) -> Result<Tensor, ModelError>
where
    F: Fn(ndarray::ArrayView2<f32>) -> Array1<f32> + Sync,
{
    validate_input_ndim(input, 3, layer)?;
    let x3 = input
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|e| ModelError::ProcessingError(e.to_string()))?;
    let (batch_size, steps, channels) = x3.dim();

    if steps == 0 {
        return Err(ModelError::InvalidArgument(format!(
            "{} received an input with zero steps",
            layer
        )));
    }

    let mut output = Array2::<f32>::zeros((batch_size, channels));

    // Choose parallel or sequential execution based on workload size
    if batch_size >= GLOBAL_POOLING_1D_PARALLEL_THRESHOLD {
        output
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(x3.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut out_row, sample)| out_row.assign(&reduce(sample)));
    } else {
        for (mut out_row, sample) in output.axis_iter_mut(Axis(0)).zip(x3.axis_iter(Axis(0))) {
            out_row.assign(&reduce(sample));
        }
    }

    Ok(output.into_dyn())
}

impl Layer for GlobalAveragePooling1D {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        pool_steps(input, "GlobalAveragePooling1D", |sample| {
            let steps = sample.nrows() as f32;
            sample.sum_axis(Axis(0)) / steps
        })
    }

    fn layer_type(&self) -> &str {
        "GlobalAveragePooling1D"
    }

    fn output_shape(&self) -> String {
        "(None, ?)".to_string()
    }
}

impl Layer for GlobalMaxPooling1D {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        pool_steps(input, "GlobalMaxPooling1D", |sample| {
            sample.fold_axis(Axis(0), f32::NEG_INFINITY, |&acc, &x| acc.max(x))
        })
    }

    fn layer_type(&self) -> &str {
        "GlobalMaxPooling1D"
    }

    fn output_shape(&self) -> String {
        "(None, ?)".to_string()
    }
}
