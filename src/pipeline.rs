use crate::dataset::{ClassifiedRecord, TextRecord};
use crate::error::{IoError, ModelError};
use crate::neural_network::InferenceSession;
use crate::utility::{
    DEFAULT_THRESHOLD, PaddingMode, SentimentLabel, TextTokenizer, pad_sequences_to_array,
    validate_threshold,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables of a classification run, loadable from a JSON file
pub mod config;
/// The end-to-end classifier: tokenize, pad, score and label text rows
pub mod classifier;

pub use classifier::*;
pub use config::*;
