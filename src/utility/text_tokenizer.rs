use super::*;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;

/// Characters removed from text before splitting, matching the Keras `Tokenizer` default
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Number of texts at which `texts_to_sequences` switches to parallel execution
const TOKENIZER_PARALLEL_THRESHOLD: usize = 256;

/// Word-index tokenizer that converts text into sequences of integer token ids
///
/// Text is optionally lowercased, every character in `filters` is replaced by the split
/// string, and the text is split into words. Each known word is mapped to its index in the
/// vocabulary. Index 0 is never assigned to a word: it is reserved for padding.
///
/// # Fields
///
/// - `word_index` - Mapping from word to its 1-based index
/// - `num_words` - If set, only words with index below this value are emitted
/// - `filters` - Characters stripped from the text before splitting
/// - `lower` - Whether text is lowercased before splitting
/// - `split` - Separator used to split words
/// - `oov_token` - Optional token used for out-of-vocabulary words
///
/// # Example
/// ```rust
/// use rustysentiment::utility::TextTokenizer;
///
/// let mut tokenizer = TextTokenizer::new(None, Some("<OOV>"));
/// tokenizer.fit_on_texts(&["the movie was great", "the plot was thin"]);
///
/// let sequences = tokenizer.texts_to_sequences(&["the movie was awful"]);
/// // "the" and "was" are the most frequent words, "<OOV>" takes index 1
/// assert_eq!(sequences, vec![vec![2, 4, 3, 1]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextTokenizer {
    word_index: AHashMap<String, u32>,
    num_words: Option<usize>,
    filters: String,
    lower: bool,
    split: String,
    oov_token: Option<String>,
}

impl Default for TextTokenizer {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl TextTokenizer {
    /// Creates an empty tokenizer with the Keras default filters, lowercasing and space splitting
    ///
    /// # Parameters
    ///
    /// - `num_words` - Optional cap on emitted indices (indices `>= num_words` are dropped or
    ///   mapped to the OOV index)
    /// - `oov_token` - Optional token that replaces unknown words. It receives index 1 when the
    ///   tokenizer is fitted
    ///
    /// # Returns
    ///
    /// * `TextTokenizer` - A tokenizer with an empty vocabulary
    pub fn new(num_words: Option<usize>, oov_token: Option<&str>) -> Self {
        TextTokenizer {
            word_index: AHashMap::new(),
            num_words,
            filters: DEFAULT_FILTERS.to_string(),
            lower: true,
            split: " ".to_string(),
            oov_token: oov_token.map(str::to_string),
        }
    }

    /// Creates a tokenizer from an existing vocabulary
    ///
    /// # Parameters
    ///
    /// - `word_index` - Mapping from word to index. Indices must be greater than 0
    /// - `num_words` - Optional cap on emitted indices
    /// - `oov_token` - Optional out-of-vocabulary token; it must be present in `word_index`
    ///
    /// # Returns
    ///
    /// - `Ok(TextTokenizer)` - The tokenizer
    /// - `Err(ModelError::InvalidArgument)` - If an index is 0 or the OOV token is not in the vocabulary
    pub fn from_word_index(
        word_index: AHashMap<String, u32>,
        num_words: Option<usize>,
        oov_token: Option<&str>,
    ) -> Result<Self, ModelError> {
        if let Some((word, _)) = word_index.iter().find(|(_, index)| **index == 0) {
            return Err(ModelError::InvalidArgument(format!(
                "word '{}' uses index 0, which is reserved for padding",
                word
            )));
        }
        if let Some(token) = oov_token {
            if !word_index.contains_key(token) {
                return Err(ModelError::InvalidArgument(format!(
                    "oov token '{}' is not part of the vocabulary",
                    token
                )));
            }
        }

        let mut tokenizer = TextTokenizer::new(num_words, oov_token);
        tokenizer.word_index = word_index;
        Ok(tokenizer)
    }

    /// Sets whether text is lowercased before splitting
    pub fn set_lower(&mut self, lower: bool) -> &mut Self {
        self.lower = lower;
        self
    }

    /// Sets the characters stripped from text before splitting
    pub fn set_filters(&mut self, filters: &str) -> &mut Self {
        self.filters = filters.to_string();
        self
    }

    /// Sets the separator used to split words. An empty separator falls back to a single space
    pub fn set_split(&mut self, split: &str) -> &mut Self {
        self.split = if split.is_empty() {
            " ".to_string()
        } else {
            split.to_string()
        };
        self
    }

    /// Gets the word index
    pub fn get_word_index(&self) -> &AHashMap<String, u32> {
        &self.word_index
    }

    /// Gets the `num_words` cap
    pub fn get_num_words(&self) -> Option<usize> {
        self.num_words
    }

    /// Gets the out-of-vocabulary token
    pub fn get_oov_token(&self) -> Option<&str> {
        self.oov_token.as_deref()
    }

    /// Number of words in the vocabulary (the OOV token included)
    pub fn vocabulary_size(&self) -> usize {
        self.word_index.len()
    }

    /// Index of the OOV token, if one is configured and known
    fn oov_index(&self) -> Option<u32> {
        self.oov_token
            .as_ref()
            .and_then(|token| self.word_index.get(token).copied())
    }

    /// Splits a text into words using the configured filters, case handling and separator
    ///
    /// # Parameters
    ///
    /// * `text` - Raw text
    ///
    /// # Returns
    ///
    /// * `Vec<String>` - Words in order of appearance, empty fragments removed
    pub fn text_to_word_sequence(&self, text: &str) -> Vec<String> {
        let text = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut cleaned = String::with_capacity(text.len());
        for c in text.chars() {
            if self.filters.contains(c) {
                cleaned.push_str(&self.split);
            } else {
                cleaned.push(c);
            }
        }

        cleaned
            .split(self.split.as_str())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Builds the vocabulary from a corpus
    ///
    /// Words are ranked by descending frequency; ties keep the order in which the words were
    /// first seen. When an OOV token is configured it is placed first and receives index 1.
    /// Any previous vocabulary is replaced.
    ///
    /// # Parameters
    ///
    /// * `texts` - Corpus to learn the vocabulary from
    pub fn fit_on_texts<S: AsRef<str>>(&mut self, texts: &[S]) {
        let mut counts: AHashMap<String, (usize, usize)> = AHashMap::new();
        let mut next_seen = 0usize;

        for text in texts {
            for word in self.text_to_word_sequence(text.as_ref()) {
                let entry = counts.entry(word).or_insert_with(|| {
                    next_seen += 1;
                    (0, next_seen)
                });
                entry.0 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first_seen))| (word, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let mut vocabulary: Vec<String> = Vec::with_capacity(ranked.len() + 1);
        if let Some(token) = &self.oov_token {
            vocabulary.push(token.clone());
        }
        vocabulary.extend(
            ranked
                .into_iter()
                .map(|(word, _, _)| word)
                .filter(|word| Some(word) != self.oov_token.as_ref()),
        );

        self.word_index = vocabulary
            .into_iter()
            .enumerate()
            .map(|(i, word)| (word, i as u32 + 1))
            .collect();

        tracing::debug!(
            vocabulary_size = self.word_index.len(),
            documents = texts.len(),
            "fitted tokenizer vocabulary"
        );
    }

    /// Converts a single text into a sequence of token ids
    ///
    /// Unknown words, and words whose index is not below `num_words`, are replaced by the OOV
    /// index when an OOV token is configured, and dropped otherwise.
    ///
    /// # Parameters
    ///
    /// * `text` - Raw text
    ///
    /// # Returns
    ///
    /// * `Vec<u32>` - Token ids in order of appearance
    pub fn text_to_sequence(&self, text: &str) -> Vec<u32> {
        let oov = self.oov_index();

        self.text_to_word_sequence(text)
            .iter()
            .filter_map(|word| match self.word_index.get(word) {
                Some(&index) => match self.num_words {
                    Some(limit) if index as usize >= limit => oov,
                    _ => Some(index),
                },
                None => oov,
            })
            .collect()
    }

    /// Converts a batch of texts into sequences of token ids
    ///
    /// # Parameters
    ///
    /// * `texts` - Raw texts
    ///
    /// # Returns
    ///
    /// * `Vec<Vec<u32>>` - One sequence per text, in input order
    pub fn texts_to_sequences<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        if texts.len() >= TOKENIZER_PARALLEL_THRESHOLD {
            texts
                .par_iter()
                .map(|text| self.text_to_sequence(text.as_ref()))
                .collect()
        } else {
            texts
                .iter()
                .map(|text| self.text_to_sequence(text.as_ref()))
                .collect()
        }
    }

    /// Loads a tokenizer from a JSON document
    ///
    /// Two layouts are accepted:
    /// - a flat object mapping each word to its index, e.g. `{"good": 1, "bad": 2}`
    /// - the document produced by Keras' `Tokenizer.to_json()`, where `config.word_index` holds
    ///   the word index (itself JSON-encoded as a string, or as a plain object), together with
    ///   `num_words`, `oov_token`, `lower`, `split` and `filters`
    ///
    /// # Parameters
    ///
    /// * `json` - JSON text
    ///
    /// # Returns
    ///
    /// - `Ok(TextTokenizer)` - The loaded tokenizer
    /// - `Err(IoError::JsonError)` - If the text is not valid JSON
    /// - `Err(IoError::ModelStructureMismatch)` - If the document does not describe a vocabulary
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        let document: Value = serde_json::from_str(json)?;

        let config = document
            .get("config")
            .filter(|config| config.get("word_index").is_some());

        match config {
            Some(config) => Self::from_keras_config(config),
            None => {
                let object = document.as_object().ok_or_else(|| {
                    IoError::ModelStructureMismatch(
                        "tokenizer JSON must be an object mapping words to indices".to_string(),
                    )
                })?;
                let word_index = parse_word_index(object)?;
                Self::from_word_index(word_index, None, None)
                    .map_err(|e| IoError::ModelStructureMismatch(e.to_string()))
            }
        }
    }

    /// Loads a tokenizer from a JSON file (see [`TextTokenizer::from_json_str`])
    ///
    /// # Parameters
    ///
    /// * `path` - Path of the JSON file
    ///
    /// # Returns
    ///
    /// - `Ok(TextTokenizer)` - The loaded tokenizer
    /// - `Err(IoError)` - If the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let tokenizer = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            vocabulary_size = tokenizer.vocabulary_size(),
            "loaded tokenizer vocabulary"
        );
        Ok(tokenizer)
    }

    /// Serializes the vocabulary as a flat `{"word": index}` JSON object
    pub fn word_index_to_json(&self) -> Result<String, IoError> {
        let object: Map<String, Value> = self
            .word_index
            .iter()
            .map(|(word, index)| (word.clone(), Value::from(*index)))
            .collect();
        Ok(serde_json::to_string(&object)?)
    }

    /// Builds a tokenizer from the `config` object of a Keras tokenizer document
    fn from_keras_config(config: &Value) -> Result<Self, IoError> {
        let word_index = match config.get("word_index") {
            Some(Value::String(encoded)) => {
                let decoded: Value = serde_json::from_str(encoded)?;
                let object = decoded.as_object().ok_or_else(|| {
                    IoError::ModelStructureMismatch(
                        "config.word_index does not encode an object".to_string(),
                    )
                })?;
                parse_word_index(object)?
            }
            Some(Value::Object(object)) => parse_word_index(object)?,
            _ => {
                return Err(IoError::ModelStructureMismatch(
                    "config.word_index must be an object or a JSON-encoded object".to_string(),
                ));
            }
        };

        let num_words = config
            .get("num_words")
            .and_then(Value::as_u64)
            .map(|n| n as usize);
        let oov_token = config.get("oov_token").and_then(Value::as_str);

        let mut tokenizer = Self::from_word_index(word_index, num_words, oov_token)
            .map_err(|e| IoError::ModelStructureMismatch(e.to_string()))?;

        if let Some(lower) = config.get("lower").and_then(Value::as_bool) {
            tokenizer.set_lower(lower);
        }
        if let Some(split) = config.get("split").and_then(Value::as_str) {
            tokenizer.set_split(split);
        }
        if let Some(filters) = config.get("filters").and_then(Value::as_str) {
            tokenizer.set_filters(filters);
        }

        Ok(tokenizer)
    }
}

/// Converts a JSON object of `word -> index` into a word index map
fn parse_word_index(object: &Map<String, Value>) -> Result<AHashMap<String, u32>, IoError> {
    object
        .iter()
        .map(|(word, index)| {
            let index = index
                .as_u64()
                .filter(|&i| i <= u32::MAX as u64)
                .ok_or_else(|| {
                    IoError::ModelStructureMismatch(format!(
                        "index of word '{}' is not a non-negative integer: {}",
                        word, index
                    ))
                })?;
            Ok((word.clone(), index as u32))
        })
        .collect()
}
