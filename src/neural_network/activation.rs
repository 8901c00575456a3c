use crate::error::ModelError;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Number of rows at which softmax is computed row-parallel
const SOFTMAX_PARALLEL_THRESHOLD: usize = 8;

/// Activation function enum, supporting the activations found in exported Keras models
///
/// # Variants
///
/// - `Linear` - Identity
/// - `ReLU` - max(0, x)
/// - `Sigmoid` - 1 / (1 + e^-x)
/// - `HardSigmoid` - clip(0.2 * x + 0.5, 0, 1), the Keras 2 default recurrent activation
/// - `Tanh` - Hyperbolic tangent
/// - `Softmax` - Row-wise normalized exponential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    ReLU,
    Sigmoid,
    HardSigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    /// Parses the activation name used in Keras layer configs
    ///
    /// # Parameters
    ///
    /// * `name` - Keras activation name such as `"relu"` or `"sigmoid"`
    ///
    /// # Returns
    ///
    /// - `Ok(Activation)` - The matching activation
    /// - `Err(ModelError::InvalidArgument)` - If the activation is not supported
    pub fn from_keras_name(name: &str) -> Result<Self, ModelError> {
        match name {
            "linear" | "" => Ok(Activation::Linear),
            "relu" => Ok(Activation::ReLU),
            "sigmoid" => Ok(Activation::Sigmoid),
            "hard_sigmoid" => Ok(Activation::HardSigmoid),
            "tanh" => Ok(Activation::Tanh),
            "softmax" => Ok(Activation::Softmax),
            other => Err(ModelError::InvalidArgument(format!(
                "unsupported activation: {}",
                other
            ))),
        }
    }

    /// Returns the Keras name of the activation
    pub fn keras_name(&self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::ReLU => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::HardSigmoid => "hard_sigmoid",
            Activation::Tanh => "tanh",
            Activation::Softmax => "softmax",
        }
    }

    /// Forward application of activation functions
    ///
    /// Applies the specified activation function to the input matrix.
    ///
    /// # Parameters
    ///
    /// - `z` - Input matrix with shape \[batch_size, features\]
    /// - `activation` - The activation function to apply
    ///
    /// # Returns
    ///
    /// * `Array2<f32>` - A new matrix with the activation function applied
    pub fn apply_activation(z: &Array2<f32>, activation: &Activation) -> Array2<f32> {
        let mut result = z.clone();
        Self::apply_activation_inplace(&mut result, activation);
        result
    }

    /// In-place variant of [`Activation::apply_activation`]
    pub fn apply_activation_inplace(z: &mut Array2<f32>, activation: &Activation) {
        match activation {
            Activation::Linear => {}
            Activation::ReLU => z.par_mapv_inplace(|x| if x > 0.0 { x } else { 0.0 }),
            Activation::Sigmoid => z.par_mapv_inplace(sigmoid),
            Activation::HardSigmoid => z.par_mapv_inplace(|x| (0.2 * x + 0.5).clamp(0.0, 1.0)),
            Activation::Tanh => z.par_mapv_inplace(|x| x.clamp(-500.0, 500.0).tanh()),
            Activation::Softmax => {
                if z.nrows() > SOFTMAX_PARALLEL_THRESHOLD {
                    z.axis_iter_mut(Axis(0))
                        .into_par_iter()
                        .for_each(|mut row| {
                            let max_val = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
                            row.mapv_inplace(|x| (x - max_val).exp());
                            let sum = row.sum();
                            row.mapv_inplace(|x| x / sum);
                        });
                } else {
                    for mut row in z.outer_iter_mut() {
                        let max_val = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
                        row.mapv_inplace(|x| (x - max_val).exp());
                        let sum = row.sum();
                        row.mapv_inplace(|x| x / sum);
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keras_name())
    }
}

/// Logistic sigmoid, clipped to avoid overflow in `exp`
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x.clamp(-500.0, 500.0)).exp())
}
