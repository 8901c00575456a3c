use super::*;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, Axis};

/// Classifies text rows as positive or negative sentiment
///
/// Owns the tokenizer and the inference session for the duration of a run. Texts are
/// tokenized, padded into one rectangular batch, scored in chunks of `batch_size` rows and
/// labelled by thresholding the scores. Output order always matches input order.
///
/// # Example
/// ```rust
/// use rustysentiment::dataset::TextRecord;
/// use rustysentiment::neural_network::*;
/// use rustysentiment::pipeline::{ClassifierConfig, SentimentClassifier};
/// use rustysentiment::utility::{SentimentLabel, TextTokenizer};
/// use ndarray::array;
///
/// let mut tokenizer = TextTokenizer::new(None, None);
/// tokenizer.fit_on_texts(&["good", "bad"]);
///
/// // Scores the last token: id 1 ("good") is positive, id 2 ("bad") negative
/// let mut model = Sequential::new();
/// model
///     .add(Embedding::from_weights(array![[0.0], [4.0], [-4.0]], None).unwrap())
///     .add(GlobalMaxPooling1D::new())
///     .add(Dense::from_weights(array![[1.0]], array![0.0], Activation::Sigmoid).unwrap());
///
/// let session = InferenceSession::from_model(model, None);
/// let classifier = SentimentClassifier::new(tokenizer, session, ClassifierConfig::default()).unwrap();
///
/// let records = vec![TextRecord::new("good"), TextRecord::new("bad")];
/// let classified = classifier.classify(&records).unwrap();
/// assert_eq!(classified[0].classification, SentimentLabel::Positive);
/// assert_eq!(classified[1].classification, SentimentLabel::Negative);
/// ```
pub struct SentimentClassifier {
    tokenizer: TextTokenizer,
    session: InferenceSession,
    config: ClassifierConfig,
}

impl SentimentClassifier {
    /// Creates a classifier from its parts
    ///
    /// # Returns
    ///
    /// - `Ok(SentimentClassifier)` - The classifier
    /// - `Err(ModelError::InvalidArgument)` - If the configuration is invalid
    pub fn new(
        tokenizer: TextTokenizer,
        session: InferenceSession,
        config: ClassifierConfig,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self {
            tokenizer,
            session,
            config,
        })
    }

    /// Loads the tokenizer and the model named in `config`
    ///
    /// # Returns
    ///
    /// - `Ok(SentimentClassifier)` - A ready classifier
    /// - `Err(IoError)` - If a file cannot be read or parsed, or the configuration is invalid
    pub fn from_config(config: ClassifierConfig) -> Result<Self, IoError> {
        config.validate().map_err(IoError::InvalidConfig)?;
        let tokenizer = TextTokenizer::from_json_file(&config.vocabulary_path)?;
        let session = InferenceSession::load(&config.model_path)?;
        Ok(Self {
            tokenizer,
            session,
            config,
        })
    }

    /// Returns the tokenizer
    pub fn tokenizer(&self) -> &TextTokenizer {
        &self.tokenizer
    }

    /// Returns the inference session
    pub fn session(&self) -> &InferenceSession {
        &self.session
    }

    /// Returns the configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Sequence length used for padding
    ///
    /// Without a configured or declared length the longest sequence is used, and never less than
    /// one step so that texts without known tokens still reach the model as a single fill value.
    fn target_length(&self, sequences: &[Vec<u32>]) -> usize {
        self.config
            .maxlen
            .or(self.session.expected_input_length())
            .unwrap_or_else(|| sequences.iter().map(Vec::len).max().unwrap_or(0).max(1))
    }

    /// Tokenizes and pads texts into a `[texts, length]` matrix of token ids
    ///
    /// # Returns
    ///
    /// - `Ok(Array2<f32>)` - One padded row per text
    /// - `Err(ModelError::InvalidArgument)` - If a text has more tokens than the target length
    pub fn encode<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Array2<f32>, ModelError> {
        let sequences = self.tokenizer.texts_to_sequences(texts);
        let padded = pad_sequences_to_array(
            &sequences,
            self.config.padding,
            self.config.pad_value,
            Some(self.target_length(&sequences)),
        )?;
        Ok(padded.mapv(|id| id as f32))
    }

    /// Classifies every record, preserving input order
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ClassifiedRecord>)` - One result per record, empty for empty input
    /// - `Err(ModelError)` - The first encoding or scoring failure; no partial results
    pub fn classify(&self, records: &[TextRecord]) -> Result<Vec<ClassifiedRecord>, ModelError> {
        if self.session.is_released() {
            return Err(ModelError::SessionReleased);
        }
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let encoded = self.encode(&texts)?;
        tracing::debug!(
            rows = encoded.nrows(),
            sequence_length = encoded.ncols(),
            "encoded input texts"
        );

        let progress_bar = if self.config.show_progress {
            let bar = ProgressBar::new(records.len() as u64);
            if let Ok(style) =
                ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
            {
                bar.set_style(style.progress_chars("█▓░"));
            }
            Some(bar)
        } else {
            None
        };

        let mut scores = Vec::with_capacity(records.len());
        for chunk in encoded.axis_chunks_iter(Axis(0), self.config.batch_size) {
            let batch_scores = self.session.predict(&chunk.to_owned())?;
            scores.extend(batch_scores.iter().copied());
            if let Some(bar) = &progress_bar {
                bar.inc(chunk.nrows() as u64);
            }
        }

        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }

        let classified: Vec<ClassifiedRecord> = records
            .iter()
            .zip(scores)
            .map(|(record, score)| ClassifiedRecord {
                text: record.text.clone(),
                classification: SentimentLabel::from_score(score, self.config.threshold),
                score,
            })
            .collect();

        tracing::info!(rows = classified.len(), "classified records");
        Ok(classified)
    }

    /// Ends the run and releases the model
    pub fn release(mut self) {
        self.session.release();
    }
}
