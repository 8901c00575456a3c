/// Container for the weights of the different layer types
///
/// Each variant borrows the weight arrays of its layer, so inspecting weights never copies
/// them.
///
/// # Variants
///
/// - `Embedding` - Lookup table of an embedding layer
/// - `Dense` - Kernel and bias of a dense (fully connected) layer
/// - `LSTM` - Kernels and biases of the four LSTM gates
/// - `Empty` - Represents a layer with no parameters
pub enum LayerWeight<'a> {
    Embedding(EmbeddingLayerWeight<'a>),
    Dense(DenseLayerWeight<'a>),
    LSTM(LSTMLayerWeight<'a>),
    Empty,
}

/// Weights for an embedding layer
///
/// # Fields
///
/// * `embeddings` - Lookup table with shape (vocabulary_size, embedding_dim)
pub struct EmbeddingLayerWeight<'a> {
    pub embeddings: &'a ndarray::Array2<f32>,
}

/// Weights for a dense (fully connected) neural network layer
///
/// # Fields
///
/// - `weight` - Weight matrix with shape (input_features, output_features)
/// - `bias` - Bias vector with shape (1, output_features)
pub struct DenseLayerWeight<'a> {
    pub weight: &'a ndarray::Array2<f32>,
    pub bias: &'a ndarray::Array2<f32>,
}

/// Weights for a single gate in an LSTM layer
///
/// # Fields
///
/// - `kernel` - Weight matrix for input features with shape (input_dim, units)
/// - `recurrent_kernel` - Weight matrix for recurrent connections with shape (units, units)
/// - `bias` - Bias vector with shape (1, units)
pub struct LSTMGateWeight<'a> {
    pub kernel: &'a ndarray::Array2<f32>,
    pub recurrent_kernel: &'a ndarray::Array2<f32>,
    pub bias: &'a ndarray::Array2<f32>,
}

/// Weights for a Long Short-Term Memory (LSTM) layer
///
/// # Fields
///
/// - `input` - Weights for the input gate, which controls what new information to store
/// - `forget` - Weights for the forget gate, which controls what information to discard
/// - `cell` - Weights for the cell gate, which proposes new cell state values
/// - `output` - Weights for the output gate, which controls what to output
pub struct LSTMLayerWeight<'a> {
    pub input: LSTMGateWeight<'a>,
    pub forget: LSTMGateWeight<'a>,
    pub cell: LSTMGateWeight<'a>,
    pub output: LSTMGateWeight<'a>,
}
