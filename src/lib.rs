/// Error types shared by every module of the crate.
///
/// - `ModelError` covers failures while preparing inputs or running a model
///   (invalid arguments, processing errors, use of a released session)
/// - `IoError` covers failures while reading or writing files and model artifacts
pub mod error;

pub use error::{IoError, ModelError};

/// Traits implemented by the building blocks of the neural network runtime.
#[cfg(feature = "neural_network")]
pub mod traits;

/// A convenience module that re-exports the most commonly used types of this crate.
///
/// # Examples
/// ```rust
/// use rustysentiment::prelude::*;
///
/// let padded = pad_sequences(&[vec![1u32, 2, 3]], PaddingMode::Pre, 0, Some(5)).unwrap();
/// assert_eq!(padded, vec![vec![0, 0, 1, 2, 3]]);
/// ```
pub mod prelude;

/// Text preprocessing for sequence models.
///
/// # Sequence padding
/// - `pad_sequences` - Pads a batch of variable-length sequences to a common length, prepending
///   (`PaddingMode::Pre`) or appending (`PaddingMode::Post`) a fill value
/// - `pad_sequences_to_array` - Same, returned as a `[batch, length]` matrix
/// - `strip_padding` - Inverse of padding a single sequence
///
/// # Tokenization
/// - `TextTokenizer` - Word-index tokenizer that reads the JSON written by Keras' `Tokenizer`
///
/// # Labels
/// - `SentimentLabel` - `positive` / `negative`, obtained by thresholding a model score
///
/// # Example
/// ```rust
/// use rustysentiment::utility::*;
///
/// let mut tokenizer = TextTokenizer::new(None, Some("<OOV>"));
/// tokenizer.fit_on_texts(&["a good film", "a bad film"]);
///
/// let sequences = tokenizer.texts_to_sequences(&["a good film", "good"]);
/// let padded = pad_sequences(&sequences, PaddingMode::Pre, 0, None).unwrap();
/// assert_eq!(padded[1].len(), 3);
/// assert_eq!(padded[1][..2], [0, 0]);
/// ```
#[cfg(feature = "utility")]
pub mod utility;

/// Reading text rows from CSV files and writing classified rows back.
///
/// The input format is one text per line, the text being everything before the first comma.
/// The output format is `text,classification` lines joined by `\n`.
#[cfg(feature = "dataset")]
pub mod dataset;

/// Inference-only neural network runtime on `ndarray`.
///
/// # Components
/// - Layers: `Embedding`, `Dense`, `LSTM`, `GlobalAveragePooling1D`, `GlobalMaxPooling1D`,
///   `Flatten`, `Dropout`
/// - `Sequential` - Linear stack of layers with `predict` and `summary`
/// - `ModelArtifacts` - Parser for exported layers-model artifacts (`model.json` plus
///   binary weight shards)
/// - `InferenceSession` - Handle owning a loaded model until it is released
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::Array;
///
/// let mut model = Sequential::new();
/// model
///     .add(Embedding::new(50, 4, Some(6)).unwrap())
///     .add(LSTM::new(4, 3, false).unwrap())
///     .add(Dense::new(3, 1, Activation::Sigmoid).unwrap());
///
/// let session = InferenceSession::from_model(model, Some(6));
/// let scores = session.predict(&Array::zeros((2, 6))).unwrap();
/// assert_eq!(scores.len(), 2);
/// ```
#[cfg(feature = "neural_network")]
pub mod neural_network;

/// End-to-end sentiment classification of text rows.
///
/// `SentimentClassifier` owns a tokenizer and an `InferenceSession`; `ClassifierConfig`
/// holds the tunables of a run and can be read from a JSON file.
#[cfg(feature = "pipeline")]
pub mod pipeline;
