use super::*;

/// Default decision threshold: scores at or above it are positive
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Sentiment label assigned to a text
///
/// # Variants
///
/// - `Positive` - The model score reached the threshold
/// - `Negative` - The model score stayed below the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Converts a model score into a label
    ///
    /// # Parameters
    ///
    /// - `score` - Model output for one text, usually a probability in \[0, 1\]
    /// - `threshold` - Decision threshold; `score >= threshold` is positive
    ///
    /// # Returns
    ///
    /// * `SentimentLabel` - `Positive` or `Negative`. A NaN score is negative
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rustysentiment::utility::SentimentLabel;
    ///
    /// assert_eq!(SentimentLabel::from_score(0.5, 0.5), SentimentLabel::Positive);
    /// assert_eq!(SentimentLabel::from_score(0.49, 0.5), SentimentLabel::Negative);
    /// ```
    pub fn from_score(score: f32, threshold: f32) -> Self {
        if score >= threshold {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }

    /// Returns the lowercase name written to CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(ModelError::InvalidArgument(format!(
                "unknown sentiment label: {}",
                other
            ))),
        }
    }
}

/// Validates a decision threshold
///
/// # Parameters
///
/// * `threshold` - Threshold to validate
///
/// # Returns
///
/// - `Ok(())` - If the threshold is finite and within \[0, 1\]
/// - `Err(ModelError::InvalidArgument)` - Otherwise
pub fn validate_threshold(threshold: f32) -> Result<(), ModelError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ModelError::InvalidArgument(format!(
            "threshold must be within [0, 1], got {}",
            threshold
        )));
    }
    Ok(())
}

/// Converts a batch of model scores into labels
///
/// # Parameters
///
/// - `scores` - One score per text
/// - `threshold` - Decision threshold
///
/// # Returns
///
/// - `Ok(Vec<SentimentLabel>)` - One label per score, same order
/// - `Err(ModelError::InvalidArgument)` - If the threshold is invalid
pub fn labels_from_scores(scores: &[f32], threshold: f32) -> Result<Vec<SentimentLabel>, ModelError> {
    validate_threshold(threshold)?;
    Ok(scores
        .iter()
        .map(|&score| SentimentLabel::from_score(score, threshold))
        .collect())
}

/// Counts positive and negative labels
///
/// # Returns
///
/// * `(usize, usize)` - `(positive, negative)`
pub fn count_labels(labels: &[SentimentLabel]) -> (usize, usize) {
    let positive = labels
        .iter()
        .filter(|label| **label == SentimentLabel::Positive)
        .count();
    (positive, labels.len() - positive)
}
