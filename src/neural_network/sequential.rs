use super::*;

/// A Sequential model: a linear stack of layers evaluated in order
///
/// Each layer feeds its output to the next one. The model is inference-only; weights come
/// either from the layer constructors or from exported artifacts (see `ModelArtifacts`).
///
/// # Fields
///
/// - `layers` - All the layers of the model, stored as boxed trait objects
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::Array;
///
/// // 4 samples of 10 token ids each
/// let x = Array::zeros((4, 10)).into_dyn();
///
/// let mut model = Sequential::new();
/// model
///     .add(Embedding::new(100, 8, Some(10)).unwrap())
///     .add(GlobalAveragePooling1D::new())
///     .add(Dense::new(8, 1, Activation::Sigmoid).unwrap());
///
/// model.summary();
///
/// let predictions = model.predict(&x).unwrap();
/// assert_eq!(predictions.shape(), &[4, 1]);
/// ```
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    /// Creates a new empty Sequential model
    ///
    /// # Returns
    ///
    /// * `Sequential` - an empty Sequential model
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a layer to the model
    ///
    /// Supports method chaining pattern
    ///
    /// # Parameters
    ///
    /// * `layer` - The layer to add to the model
    ///
    /// # Returns
    ///
    /// * `&mut Sequential` - Mutable reference to self for method chaining
    pub fn add<L: 'static + Layer>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Adds an already boxed layer to the model
    pub fn add_boxed(&mut self, layer: Box<dyn Layer>) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Returns the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the model has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterates over the layers in evaluation order
    pub fn layers(&self) -> impl Iterator<Item = &dyn Layer> {
        self.layers.iter().map(|layer| layer.as_ref())
    }

    /// Runs the input through every layer in order
    ///
    /// # Parameters
    ///
    /// * `x` - Input tensor, batch on the first axis
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Output of the last layer
    /// - `Err(ModelError::ProcessingError)` - If the model has no layers
    /// - `Err(ModelError)` - The first error raised by a layer
    pub fn predict(&self, x: &Tensor) -> Result<Tensor, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::ProcessingError(
                "model has no layers".to_string(),
            ));
        }

        let mut output = x.clone();
        for layer in &self.layers {
            output = layer.forward(&output)?;
        }
        Ok(output)
    }

    /// Total number of parameters over all layers
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.param_count()).sum()
    }

    /// Renders the layer table shown by `summary`
    pub fn summary_table(&self) -> String {
        let col1_width = 33;
        let col2_width = 24;
        let col3_width = 15;

        let mut table = String::from("Model: \"sequential\"\n");
        table.push_str(&format!(
            "┏{}┳{}┳{}┓\n",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        ));
        table.push_str(&format!(
            "┃ {:<31} ┃ {:<22} ┃ {:>13} ┃\n",
            "Layer (type)", "Output Shape", "Param #"
        ));
        table.push_str(&format!(
            "┡{}╇{}╇{}┩\n",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        ));

        for (i, layer) in self.layers.iter().enumerate() {
            // First layer is named "Layer", then "Layer_1", "Layer_2", etc.
            let layer_name = if i == 0 {
                "Layer".to_string()
            } else {
                format!("Layer_{}", i)
            };
            table.push_str(&format!(
                "│ {:<31} │ {:<22} │ {:>13} │\n",
                format!("{} ({})", layer_name, layer.layer_type()),
                layer.output_shape(),
                layer.param_count()
            ));
        }

        let total_params = self.param_count();
        table.push_str(&format!(
            "└{}┴{}┴{}┘\n",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width)
        ));
        // f32 parameters, 4 bytes each
        table.push_str(&format!(
            " Total params: {} ({} B)",
            total_params,
            total_params * 4
        ));
        table
    }

    /// Prints a summary of the model structure to stdout
    pub fn summary(&self) {
        println!("{}", self.summary_table());
    }

    /// Returns all the weights from each layer in the model.
    ///
    /// # Returns
    ///
    /// * `Vec<LayerWeight>` - One entry per layer, in evaluation order
    pub fn get_weights(&self) -> Vec<LayerWeight<'_>> {
        self.layers.iter().map(|layer| layer.get_weights()).collect()
    }
}
