use super::*;

#[test]
fn test_dense_forward_pass_dimensions() {
    let dense = Dense::new(4, 3, Activation::ReLU).unwrap();
    let input = Array::ones((2, 4)).into_dyn(); // batch_size=2, input_dim=4

    let output = dense.forward(&input).unwrap();
    assert_eq!(output.shape(), &[2, 3]);
    assert!(output.iter().all(|&v| v >= 0.0));
}

#[test]
fn test_dense_from_weights_values() {
    let dense = Dense::from_weights(
        array![[1.0, -1.0], [0.5, 2.0]],
        array![0.0, 1.0],
        Activation::Linear,
    )
    .unwrap();

    let output = dense.forward(&array![[2.0, 4.0], [0.0, 1.0]].into_dyn()).unwrap();
    assert_eq!(output, array![[4.0f32, 7.0], [0.5, 3.0]].into_dyn());
}

#[test]
fn test_dense_applies_to_last_axis() {
    let dense = Dense::from_weights(array![[1.0], [1.0]], array![0.5], Activation::Linear).unwrap();
    let input = Array::ones((2, 3, 2)).into_dyn();

    let output = dense.forward(&input).unwrap();
    assert_eq!(output.shape(), &[2, 3, 1]);
    assert!(output.iter().all(|&v| v == 2.5));
}

#[test]
fn test_dense_rejects_bad_shapes() {
    let dense = Dense::new(4, 3, Activation::Linear).unwrap();
    assert!(matches!(
        dense.forward(&Array::ones((2, 5)).into_dyn()),
        Err(ModelError::InvalidArgument(_))
    ));
    assert!(matches!(
        dense.forward(&Array::ones(4).into_dyn()),
        Err(ModelError::InvalidArgument(_))
    ));

    assert!(Dense::new(0, 3, Activation::Linear).is_err());
    assert!(Dense::from_weights(array![[1.0, 2.0]], array![0.0], Activation::Linear).is_err());
}

#[test]
fn test_dense_param_count_and_weights() {
    let dense = Dense::new(4, 3, Activation::Sigmoid).unwrap();
    assert_eq!(dense.param_count(), 4 * 3 + 3);
    assert_eq!(dense.layer_type(), "Dense");
    assert_eq!(dense.output_shape(), "(None, 3)");

    match dense.get_weights() {
        LayerWeight::Dense(w) => {
            assert_eq!(w.weight.shape(), &[4, 3]);
            assert_eq!(w.bias.shape(), &[1, 3]);
            assert!(w.bias.iter().all(|&b| b == 0.0));
        }
        _ => panic!("expected dense weights"),
    }
}
