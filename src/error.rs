use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Error types that can occur while preparing inputs or running a model
///
/// # Variants
///
/// - `InvalidArgument` - An argument does not meet the expected format, range or shape
///   (unsupported padding mode, sequence longer than the target length, unknown activation, ...)
/// - `ProcessingError` - Something went wrong while a layer or the model was computing
/// - `SessionReleased` - The inference session was used after it had been released
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidArgument(String),
    ProcessingError(String),
    SessionReleased,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            ModelError::SessionReleased => {
                write!(
                    f,
                    "Inference session has been released. Load a new session before predicting."
                )
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Input/Output error types that can occur while reading or writing files and model artifacts
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations (reading, writing, file access)
/// - `JsonError` - Wraps JSON serialization/deserialization errors when working with JSON data formats
/// - `ModelStructureMismatch` - The artifacts on disk do not describe a model this crate can build
///   (unknown layer class, missing weights, wrong weight shapes, unsupported dtype, ...)
/// - `InvalidConfig` - A configuration read from disk holds a value rejected by validation
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    JsonError(serde_json::Error),
    ModelStructureMismatch(String),
    InvalidConfig(ModelError),
}

impl IoError {
    /// Opens the file at `path` wrapped in a `BufReader`
    ///
    /// # Parameters
    ///
    /// * `path` - Path of the file to open
    ///
    /// # Returns
    ///
    /// - `Ok(BufReader<File>)` - Buffered reader over the opened file
    /// - `Err(IoError::StdIoError)` - If the file could not be opened
    pub fn load_in_buf_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, IoError> {
        let file = File::open(path).map_err(IoError::StdIoError)?;
        Ok(BufReader::new(file))
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::JsonError(e) => write!(f, "JSON error: {}", e),
            IoError::ModelStructureMismatch(msg) => write!(f, "Model structure mismatch: {}", msg),
            IoError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIoError(e) => Some(e),
            IoError::JsonError(e) => Some(e),
            IoError::ModelStructureMismatch(_) => None,
            IoError::InvalidConfig(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::StdIoError(e)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::JsonError(e)
    }
}
