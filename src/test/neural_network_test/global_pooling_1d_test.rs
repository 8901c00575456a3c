use super::*;

fn sample_input() -> Tensor {
    // batch=1, steps=3, channels=2
    array![[[1.0, -4.0], [2.0, 0.0], [6.0, -2.0]]].into_dyn()
}

#[test]
fn test_global_average_pooling_1d_values() {
    let output = GlobalAveragePooling1D::new().forward(&sample_input()).unwrap();
    assert_eq!(output.shape(), &[1, 2]);
    assert_relative_eq!(output[[0, 0]], 3.0);
    assert_relative_eq!(output[[0, 1]], -2.0);
}

#[test]
fn test_global_max_pooling_1d_values() {
    let output = GlobalMaxPooling1D::new().forward(&sample_input()).unwrap();
    assert_eq!(output, array![[6.0f32, 0.0]].into_dyn());
}

#[test]
fn test_global_pooling_large_batch() {
    let input = Array::from_shape_fn((40, 5, 3), |(b, t, c)| (b + t + c) as f32).into_dyn();

    let avg = GlobalAveragePooling1D::new().forward(&input).unwrap();
    let max = GlobalMaxPooling1D::new().forward(&input).unwrap();

    assert_eq!(avg.shape(), &[40, 3]);
    // steps 0..5 average to 2, max is 4
    assert_relative_eq!(avg[[10, 1]], 10.0 + 2.0 + 1.0);
    assert_eq!(max[[39, 2]], 39.0 + 4.0 + 2.0);
}

#[test]
fn test_global_pooling_rejects_bad_input() {
    let pooling = GlobalAveragePooling1D::new();
    assert!(pooling.forward(&Array::ones((2, 3)).into_dyn()).is_err());
    assert!(pooling.forward(&Array::ones((2, 0, 3)).into_dyn()).is_err());
    assert_eq!(pooling.param_count(), 0);
    assert_eq!(GlobalMaxPooling1D::new().layer_type(), "GlobalMaxPooling1D");
}
