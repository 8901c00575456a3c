pub use crate::utility::label_encoding::{
    DEFAULT_THRESHOLD, SentimentLabel, count_labels, labels_from_scores, validate_threshold,
};
pub use crate::utility::pad_sequences::{
    PaddingMode, pad_sequences, pad_sequences_to_array, strip_padding,
};
pub use crate::utility::text_tokenizer::TextTokenizer;
