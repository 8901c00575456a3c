use super::*;

/// Dropout layer as it behaves at inference time
///
/// Dropout only perturbs activations during training, so a loaded model treats it as the
/// identity. The layer is kept in the stack so that `summary` mirrors the exported topology.
/// Both Keras `Dropout` and `SpatialDropout1D` map onto this type.
///
/// # Fields
///
/// - `rate` - Fraction of units the training graph dropped
/// - `layer_type` - Keras class name reported by `layer_type`
pub struct Dropout {
    rate: f32,
    layer_type: String,
}

impl Dropout {
    /// Creates a `Dropout` layer
    ///
    /// # Parameters
    ///
    /// - `rate` - Dropout rate in \[0, 1)
    ///
    /// # Returns
    ///
    /// - `Ok(Dropout)` - The layer
    /// - `Err(ModelError::InvalidArgument)` - If `rate` is outside \[0, 1)
    pub fn new(rate: f32) -> Result<Self, ModelError> {
        Self::with_layer_type(rate, "Dropout")
    }

    /// Creates a `SpatialDropout1D` layer
    pub fn spatial_1d(rate: f32) -> Result<Self, ModelError> {
        Self::with_layer_type(rate, "SpatialDropout1D")
    }

    fn with_layer_type(rate: f32, layer_type: &str) -> Result<Self, ModelError> {
        if !(0.0..1.0).contains(&rate) {
            return Err(ModelError::InvalidArgument(format!(
                "dropout rate must be in [0, 1), got {}",
                rate
            )));
        }
        Ok(Self {
            rate,
            layer_type: layer_type.to_string(),
        })
    }

    /// Returns the dropout rate
    pub fn get_rate(&self) -> f32 {
        self.rate
    }
}

impl Layer for Dropout {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        Ok(input.clone())
    }

    fn layer_type(&self) -> &str {
        &self.layer_type
    }

    fn output_shape(&self) -> String {
        "Same as input".to_string()
    }
}
