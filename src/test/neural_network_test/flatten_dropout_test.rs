use super::*;

#[test]
fn test_flatten_forward() {
    let input = Array::from_shape_fn((2, 3, 2), |(b, t, c)| (b * 6 + t * 2 + c) as f32).into_dyn();
    let output = Flatten::new().forward(&input).unwrap();

    assert_eq!(output.shape(), &[2, 6]);
    assert_eq!(output[[1, 0]], 6.0);
    assert_eq!(output[[1, 5]], 11.0);
}

#[test]
fn test_flatten_rejects_1d() {
    assert!(Flatten::new().forward(&Array::ones(3).into_dyn()).is_err());
}

#[test]
fn test_dropout_is_identity() {
    let input = Array::from_shape_fn((2, 4), |(i, j)| (i + j) as f32).into_dyn();

    let dropout = Dropout::new(0.5).unwrap();
    assert_eq!(dropout.forward(&input).unwrap(), input);
    assert_eq!(dropout.layer_type(), "Dropout");
    assert_eq!(dropout.get_rate(), 0.5);

    let spatial = Dropout::spatial_1d(0.2).unwrap();
    assert_eq!(spatial.layer_type(), "SpatialDropout1D");
    assert_eq!(spatial.forward(&input).unwrap(), input);
}

#[test]
fn test_dropout_rate_validation() {
    assert!(Dropout::new(1.0).is_err());
    assert!(Dropout::new(-0.1).is_err());
    assert!(Dropout::new(0.0).is_ok());
}
