use super::*;

#[test]
fn test_activation_from_keras_name() {
    assert_eq!(Activation::from_keras_name("sigmoid").unwrap(), Activation::Sigmoid);
    assert_eq!(Activation::from_keras_name("relu").unwrap(), Activation::ReLU);
    assert_eq!(Activation::from_keras_name("linear").unwrap(), Activation::Linear);
    assert_eq!(Activation::from_keras_name("hard_sigmoid").unwrap(), Activation::HardSigmoid);
    assert!(matches!(
        Activation::from_keras_name("swishy"),
        Err(ModelError::InvalidArgument(_))
    ));
    assert_eq!(Activation::Softmax.to_string(), "softmax");
}

#[test]
fn test_apply_activation_values() {
    let z = array![[-1.0, 0.0, 2.0]];

    assert_eq!(Activation::apply_activation(&z, &Activation::ReLU), array![[0.0f32, 0.0, 2.0]]);
    assert_eq!(Activation::apply_activation(&z, &Activation::Linear), z);

    let sig = Activation::apply_activation(&z, &Activation::Sigmoid);
    assert_relative_eq!(sig[[0, 1]], 0.5);
    assert_relative_eq!(sig[[0, 2]], 0.880797, epsilon = 1e-5);

    let hard = Activation::apply_activation(&array![[-5.0, 0.0, 1.0, 5.0]], &Activation::HardSigmoid);
    assert_eq!(hard[[0, 0]], 0.0);
    assert_relative_eq!(hard[[0, 2]], 0.7, epsilon = 1e-6);
    assert_eq!(hard[[0, 3]], 1.0);

    let tanh = Activation::apply_activation(&z, &Activation::Tanh);
    assert_relative_eq!(tanh[[0, 0]], (-1.0f32).tanh(), epsilon = 1e-6);
}

#[test]
fn test_softmax_rows_sum_to_one() {
    // More rows than the parallel threshold exercises the row-parallel branch
    let z = Array2::from_shape_fn((20, 3), |(i, j)| (i * j) as f32 * 0.1);
    let out = Activation::apply_activation(&z, &Activation::Softmax);

    for row in out.rows() {
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-5);
    }

    let two_class = Activation::apply_activation(&array![[0.0, 0.0]], &Activation::Softmax);
    assert_relative_eq!(two_class[[0, 1]], 0.5);
}

#[test]
fn test_sigmoid_is_clipped() {
    assert_relative_eq!(sigmoid(1000.0), 1.0);
    assert_relative_eq!(sigmoid(-1000.0), 0.0);
}
