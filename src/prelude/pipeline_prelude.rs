pub use crate::pipeline::classifier::SentimentClassifier;
pub use crate::pipeline::config::ClassifierConfig;
