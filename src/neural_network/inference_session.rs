use super::*;
use ndarray::{Array1, Array2, Axis};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handle owning a loaded model for the lifetime of a classification run
///
/// A session is either ready, holding its `Sequential` model, or released. Releasing drops
/// the model; every later `predict` fails with `ModelError::SessionReleased`.
///
/// # Fields
///
/// - `model` - The loaded model, `None` once released
/// - `expected_input_length` - Sequence length the model was exported with, if known
/// - `predictions_served` - Number of rows scored so far
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::array;
///
/// let mut model = Sequential::new();
/// model.add(Dense::from_weights(array![[1.0], [1.0]], array![0.0], Activation::Sigmoid).unwrap());
///
/// let mut session = InferenceSession::from_model(model, Some(2));
/// let scores = session.predict(&array![[0.0, 0.0], [3.0, 3.0]]).unwrap();
/// assert_eq!(scores[0], 0.5);
/// assert!(scores[1] > 0.99);
///
/// session.release();
/// assert!(session.predict(&array![[0.0, 0.0]]).is_err());
/// ```
pub struct InferenceSession {
    model: Option<Sequential>,
    expected_input_length: Option<usize>,
    predictions_served: AtomicUsize,
}

impl InferenceSession {
    /// Loads a session from a `model.json` file and the shards listed in its manifest
    ///
    /// Shards are resolved relative to the directory of `model_json_path`.
    ///
    /// # Returns
    ///
    /// - `Ok(InferenceSession)` - A ready session
    /// - `Err(IoError)` - If a file cannot be read or the artifacts do not describe a
    ///   supported model
    pub fn load(model_json_path: impl AsRef<Path>) -> Result<Self, IoError> {
        let model_json_path = model_json_path.as_ref();
        let artifacts = ModelArtifacts::from_file(model_json_path)?;
        let base_dir = model_json_path.parent().unwrap_or_else(|| Path::new("."));
        let weight_bytes = artifacts.read_weight_bytes(base_dir)?;

        let session = Self::from_artifacts(&artifacts, &weight_bytes)?;
        tracing::info!(
            path = %model_json_path.display(),
            layers = session.model.as_ref().map_or(0, Sequential::len),
            expected_input_length = ?session.expected_input_length,
            "loaded inference session"
        );
        Ok(session)
    }

    /// Builds a session from parsed artifacts and their concatenated shard bytes
    pub fn from_artifacts(artifacts: &ModelArtifacts, weight_bytes: &[u8]) -> Result<Self, IoError> {
        let model = artifacts.build_model(weight_bytes)?;
        Ok(Self::from_model(model, artifacts.expected_input_length()))
    }

    /// Wraps an already built model
    pub fn from_model(model: Sequential, expected_input_length: Option<usize>) -> Self {
        Self {
            model: Some(model),
            expected_input_length,
            predictions_served: AtomicUsize::new(0),
        }
    }

    /// Scores a padded batch, one score per row
    ///
    /// A model output of shape `[n, 1]` gives its single column; a two-class output of shape
    /// `[n, 2]` gives the probability of the positive class (column 1).
    ///
    /// # Parameters
    ///
    /// * `batch` - Padded token matrix with shape (rows, sequence_length)
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f32>)` - One score per row, empty for an empty batch
    /// - `Err(ModelError::SessionReleased)` - If the session was released
    /// - `Err(ModelError::InvalidArgument)` - If the row length differs from the expected input length
    /// - `Err(ModelError::ProcessingError)` - If the model output has an unsupported shape
    pub fn predict(&self, batch: &Array2<f32>) -> Result<Array1<f32>, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::SessionReleased)?;

        if batch.nrows() == 0 {
            return Ok(Array1::zeros(0));
        }

        if let Some(expected) = self.expected_input_length {
            if batch.ncols() != expected {
                return Err(ModelError::InvalidArgument(format!(
                    "model expects sequences of length {}, got {}",
                    expected,
                    batch.ncols()
                )));
            }
        }

        let output = model.predict(&batch.clone().into_dyn())?;
        let scores = match output.shape() {
            [rows, 1] | [rows, 2] if *rows == batch.nrows() => {
                let positive_column = output.shape()[1] - 1;
                output.index_axis(Axis(1), positive_column).to_owned()
            }
            shape => {
                return Err(ModelError::ProcessingError(format!(
                    "model output shape {:?} cannot be read as one score per row",
                    shape
                )));
            }
        };

        let scores = scores
            .into_dimensionality::<ndarray::Ix1>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;
        self.predictions_served.fetch_add(scores.len(), Ordering::Relaxed);
        tracing::debug!(rows = scores.len(), "scored batch");
        Ok(scores)
    }

    /// Sequence length the model was exported with, if known
    pub fn expected_input_length(&self) -> Option<usize> {
        self.expected_input_length
    }

    /// Number of rows scored since the session was created
    pub fn predictions_served(&self) -> usize {
        self.predictions_served.load(Ordering::Relaxed)
    }

    /// Returns the layer table of the loaded model
    ///
    /// # Returns
    ///
    /// - `Ok(String)` - The table
    /// - `Err(ModelError::SessionReleased)` - If the session was released
    pub fn summary(&self) -> Result<String, ModelError> {
        self.model
            .as_ref()
            .map(Sequential::summary_table)
            .ok_or(ModelError::SessionReleased)
    }

    /// Returns `true` once the session has been released
    pub fn is_released(&self) -> bool {
        self.model.is_none()
    }

    /// Drops the model. Releasing an already released session does nothing.
    pub fn release(&mut self) {
        if self.model.take().is_some() {
            tracing::info!(
                predictions_served = self.predictions_served(),
                "released inference session"
            );
        }
    }
}
