use super::*;

/// Embedding layer: maps integer token ids to dense vectors
///
/// Input shape is `[batch_size, steps]` holding token ids stored as `f32`; output shape is
/// `[batch_size, steps, embedding_dim]`. Ids must be non-negative integers smaller than the
/// vocabulary size.
///
/// # Fields
///
/// - `input_dim` - Vocabulary size (number of rows of the lookup table)
/// - `output_dim` - Embedding dimension
/// - `input_length` - Sequence length the model was exported with, if known
/// - `embeddings` - Lookup table with shape (input_dim, output_dim)
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::array;
///
/// let embedding = Embedding::from_weights(array![[0.0, 0.0], [1.0, 2.0], [3.0, 4.0]], None).unwrap();
/// let out = embedding.forward(&array![[2.0, 0.0, 1.0]].into_dyn()).unwrap();
/// assert_eq!(out.shape(), &[1, 3, 2]);
/// assert_eq!(out[[0, 0, 1]], 4.0);
/// ```
pub struct Embedding {
    input_dim: usize,
    output_dim: usize,
    input_length: Option<usize>,
    embeddings: Array2<f32>,
}

impl Embedding {
    /// Creates an embedding layer with a uniformly initialized table in \[-0.05, 0.05\]
    ///
    /// # Parameters
    ///
    /// - `input_dim` - Vocabulary size
    /// - `output_dim` - Embedding dimension
    /// - `input_length` - Optional fixed sequence length
    ///
    /// # Returns
    ///
    /// - `Ok(Embedding)` - The new layer
    /// - `Err(ModelError::InvalidArgument)` - If a dimension is 0
    pub fn new(input_dim: usize, output_dim: usize, input_length: Option<usize>) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(output_dim, "output_dim")?;

        Ok(Self {
            input_dim,
            output_dim,
            input_length,
            embeddings: Array::random((input_dim, output_dim), Uniform::new(-0.05, 0.05)),
        })
    }

    /// Creates an embedding layer from a trained lookup table
    ///
    /// # Parameters
    ///
    /// - `embeddings` - Lookup table with shape (vocabulary_size, embedding_dim)
    /// - `input_length` - Optional fixed sequence length
    pub fn from_weights(embeddings: Array2<f32>, input_length: Option<usize>) -> Result<Self, ModelError> {
        let (input_dim, output_dim) = embeddings.dim();
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(output_dim, "output_dim")?;

        Ok(Self {
            input_dim,
            output_dim,
            input_length,
            embeddings,
        })
    }

    /// Returns the vocabulary size
    pub fn get_input_dim(&self) -> usize {
        self.input_dim
    }

    /// Returns the embedding dimension
    pub fn get_output_dim(&self) -> usize {
        self.output_dim
    }

    /// Returns the fixed sequence length, if any
    pub fn get_input_length(&self) -> Option<usize> {
        self.input_length
    }

    /// Converts a stored id into a row index of the lookup table
    fn token_index(&self, id: f32) -> Result<usize, ModelError> {
        if id < 0.0 || id.fract() != 0.0 || id as usize >= self.input_dim {
            return Err(ModelError::InvalidArgument(format!(
                "token id {} is outside the vocabulary of size {}",
                id, self.input_dim
            )));
        }
        Ok(id as usize)
    }
}

impl Layer for Embedding {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_ndim(input, 2, "Embedding")?;
        let ids = input
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;
        let (batch_size, steps) = ids.dim();

        let mut output = Array3::<f32>::zeros((batch_size, steps, self.output_dim));
        for ((b, t), &id) in ids.indexed_iter() {
            let row = self.token_index(id)?;
            output
                .slice_mut(ndarray::s![b, t, ..])
                .assign(&self.embeddings.row(row));
        }

        Ok(output.into_dyn())
    }

    fn layer_type(&self) -> &str {
        "Embedding"
    }

    fn output_shape(&self) -> String {
        match self.input_length {
            Some(length) => format!("(None, {}, {})", length, self.output_dim),
            None => format!("(None, None, {})", self.output_dim),
        }
    }

    fn param_count(&self) -> usize {
        self.input_dim * self.output_dim
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Embedding(EmbeddingLayerWeight {
            embeddings: &self.embeddings,
        })
    }
}
