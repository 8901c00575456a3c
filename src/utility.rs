use crate::error::{IoError, ModelError};
use ahash::AHashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// This module provides the sequence padder that turns variable-length token sequences into a
/// rectangular batch, prepending or appending a fill value to every sequence
pub mod pad_sequences;

/// This module provides a word-index tokenizer compatible with the JSON written by Keras'
/// text `Tokenizer`, converting raw text into integer token sequences
pub mod text_tokenizer;

/// This module converts model scores into sentiment labels by thresholding
pub mod label_encoding;

pub use label_encoding::*;
pub use pad_sequences::*;
pub use text_tokenizer::*;
