use super::*;

#[test]
fn test_from_score_threshold_is_inclusive() {
    assert_eq!(SentimentLabel::from_score(0.5, DEFAULT_THRESHOLD), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_score(0.4999, DEFAULT_THRESHOLD), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_score(0.9, 0.95), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_score(f32::NAN, 0.5), SentimentLabel::Negative);
}

#[test]
fn test_label_names() {
    assert_eq!(SentimentLabel::Positive.to_string(), "positive");
    assert_eq!(SentimentLabel::Negative.as_str(), "negative");
    assert_eq!("positive".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
    assert!("neutral".parse::<SentimentLabel>().is_err());
}

#[test]
fn test_validate_threshold() {
    assert!(validate_threshold(0.0).is_ok());
    assert!(validate_threshold(1.0).is_ok());
    assert!(matches!(validate_threshold(1.5), Err(ModelError::InvalidArgument(_))));
    assert!(matches!(validate_threshold(-0.1), Err(ModelError::InvalidArgument(_))));
    assert!(matches!(validate_threshold(f32::NAN), Err(ModelError::InvalidArgument(_))));
}

#[test]
fn test_labels_from_scores_and_counts() {
    let scores = array![0.1f32, 0.7, 0.5, 0.2];
    let labels = labels_from_scores(scores.as_slice().unwrap(), 0.5).unwrap();
    assert_eq!(
        labels,
        vec![
            SentimentLabel::Negative,
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Negative
        ]
    );
    assert_eq!(count_labels(&labels), (2, 2));
    assert!(labels_from_scores(&[0.3], 2.0).is_err());
}
