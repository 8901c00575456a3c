use super::*;
use std::str::FromStr;

#[test]
fn test_pad_sequences_default_target_is_longest() {
    let batch = vec![vec![1, 2, 3], vec![1, 2, 3, 4, 5], vec![1, 2]];
    let padded = pad_sequences(&batch, PaddingMode::Pre, 0, None).unwrap();

    assert!(padded.iter().all(|row| row.len() == 5));
    assert_eq!(padded[1], vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_pad_sequences_pre() {
    let padded = pad_sequences(&[vec![1, 2, 3]], PaddingMode::Pre, 0, Some(5)).unwrap();
    assert_eq!(padded, vec![vec![0, 0, 1, 2, 3]]);
}

#[test]
fn test_pad_sequences_post() {
    let padded = pad_sequences(&[vec![1, 2, 3]], PaddingMode::Post, 0, Some(5)).unwrap();
    assert_eq!(padded, vec![vec![1, 2, 3, 0, 0]]);
}

#[test]
fn test_pad_sequences_custom_fill_value() {
    let padded = pad_sequences(&[vec![7], vec![1, 2, 3]], PaddingMode::Pre, 9, None).unwrap();
    assert_eq!(padded, vec![vec![9, 9, 7], vec![1, 2, 3]]);
}

#[test]
fn test_pad_sequences_exact_length_unchanged() {
    let batch = vec![vec![4, 5, 6]];
    let padded = pad_sequences(&batch, PaddingMode::Post, 0, Some(3)).unwrap();
    assert_eq!(padded, batch);
}

#[test]
fn test_pad_sequences_empty_batch() {
    let batch: Vec<Vec<u32>> = Vec::new();
    let padded = pad_sequences(&batch, PaddingMode::Pre, 0, None).unwrap();
    assert!(padded.is_empty());

    let matrix = pad_sequences_to_array(&batch, PaddingMode::Pre, 0, None).unwrap();
    assert_eq!(matrix.shape(), &[0, 0]);
}

#[test]
fn test_pad_sequences_empty_sequence_is_all_fill() {
    let padded = pad_sequences(&[vec![], vec![3, 4]], PaddingMode::Post, -1, None).unwrap();
    assert_eq!(padded, vec![vec![-1, -1], vec![3, 4]]);
}

#[test]
fn test_pad_sequences_over_length_is_rejected() {
    let batch = vec![vec![1], vec![1, 2, 3, 4]];
    let result = pad_sequences(&batch, PaddingMode::Pre, 0, Some(3));

    match result {
        Err(ModelError::InvalidArgument(msg)) => {
            assert!(msg.contains("sequence exceeds target length"));
            assert!(msg.contains("sequence 1"));
        }
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_pad_sequences_does_not_mutate_input() {
    let batch = vec![vec![1.5f32, 2.5], vec![3.5]];
    let copy = batch.clone();
    let _ = pad_sequences(&batch, PaddingMode::Pre, 0.0, Some(4)).unwrap();
    assert_eq!(batch, copy);
}

#[test]
fn test_pad_sequences_round_trip_and_order() {
    let batch = vec![vec![5, 1, 4], vec![], vec![9, 8, 7, 6, 5, 4], vec![2]];

    for mode in [PaddingMode::Pre, PaddingMode::Post] {
        let padded = pad_sequences(&batch, mode, 0, Some(8)).unwrap();
        assert_eq!(padded.len(), batch.len());

        for (original, row) in batch.iter().zip(&padded) {
            assert_eq!(row.len(), 8);
            let stripped = strip_padding(row, original.len(), mode).unwrap();
            assert_eq!(stripped, original.as_slice());
        }
    }
}

#[test]
fn test_pad_sequences_to_array_layout() {
    let matrix =
        pad_sequences_to_array(&[vec![1, 2], vec![3]], PaddingMode::Pre, 0, Some(3)).unwrap();
    assert_eq!(matrix, array![[0, 1, 2], [0, 0, 3]]);
}

#[test]
fn test_strip_padding_rejects_longer_original() {
    assert!(matches!(
        strip_padding(&[0, 1], 3, PaddingMode::Pre),
        Err(ModelError::InvalidArgument(_))
    ));
}

#[test]
fn test_padding_mode_parsing() {
    assert_eq!(PaddingMode::from_str("pre").unwrap(), PaddingMode::Pre);
    assert_eq!("post".parse::<PaddingMode>().unwrap(), PaddingMode::Post);
    assert_eq!(PaddingMode::default(), PaddingMode::Pre);

    match "mid".parse::<PaddingMode>() {
        Err(ModelError::InvalidArgument(msg)) => assert!(msg.contains("mid")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_padding_mode_serde_lowercase() {
    assert_eq!(serde_json::to_string(&PaddingMode::Post).unwrap(), "\"post\"");
    let mode: PaddingMode = serde_json::from_str("\"pre\"").unwrap();
    assert_eq!(mode, PaddingMode::Pre);
    assert!(serde_json::from_str::<PaddingMode>("\"mid\"").is_err());
}
