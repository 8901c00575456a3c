use super::*;

/// Default number of rows scored per model call
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Configuration of a classification run
///
/// Every field has a default, so a JSON file only needs to name the values it changes.
///
/// # Fields
///
/// - `model_path` - Path of the exported `model.json`; weight shards are read from its directory
/// - `vocabulary_path` - Path of the tokenizer JSON (flat word index or Keras tokenizer document)
/// - `padding` - Side on which sequences are padded, `pre` by default
/// - `pad_value` - Token id used as fill value, 0 by default
/// - `maxlen` - Target sequence length; when absent the model's expected input length is used,
///   then the longest sequence of the input
/// - `threshold` - Scores at or above it are positive, 0.5 by default
/// - `batch_size` - Rows per model call
/// - `has_header` - Whether the first CSV row is a header to skip
/// - `show_progress` - Whether to draw a progress bar while scoring
///
/// # Example
/// ```rust
/// use rustysentiment::pipeline::ClassifierConfig;
/// use rustysentiment::utility::PaddingMode;
///
/// let config = ClassifierConfig::from_json_str(r#"{"padding": "post", "maxlen": 100}"#).unwrap();
/// assert_eq!(config.padding, PaddingMode::Post);
/// assert_eq!(config.maxlen, Some(100));
/// assert_eq!(config.threshold, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub vocabulary_path: PathBuf,
    pub padding: PaddingMode,
    pub pad_value: u32,
    pub maxlen: Option<usize>,
    pub threshold: f32,
    pub batch_size: usize,
    pub has_header: bool,
    pub show_progress: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            model_path: PathBuf::from("model/model.json"),
            vocabulary_path: PathBuf::from("model/tokenizer.json"),
            padding: PaddingMode::Pre,
            pad_value: 0,
            maxlen: None,
            threshold: DEFAULT_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
            has_header: false,
            show_progress: false,
        }
    }
}

impl ClassifierConfig {
    /// Checks that every value is usable
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the configuration is valid
    /// - `Err(ModelError::InvalidArgument)` - If the threshold is not a finite value in \[0, 1\],
    ///   the batch size is 0 or `maxlen` is 0
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_threshold(self.threshold)?;

        if self.batch_size == 0 {
            return Err(ModelError::InvalidArgument(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        if self.maxlen == Some(0) {
            return Err(ModelError::InvalidArgument(
                "maxlen must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses and validates a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        let config: ClassifierConfig = serde_json::from_str(json)?;
        config.validate().map_err(IoError::InvalidConfig)?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let reader = IoError::load_in_buf_reader(path.as_ref())?;
        let config: ClassifierConfig = serde_json::from_reader(reader)?;
        config.validate().map_err(IoError::InvalidConfig)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded classifier configuration");
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
