use super::*;

fn small_model() -> Sequential {
    let mut model = Sequential::new();
    model
        .add(Embedding::from_weights(array![[0.0, 0.0], [1.0, 3.0], [-1.0, -3.0]], Some(2)).unwrap())
        .add(GlobalAveragePooling1D::new())
        .add(Dense::from_weights(array![[1.0], [0.0]], array![0.0], Activation::Linear).unwrap());
    model
}

#[test]
fn test_sequential_predict_chains_layers() {
    let model = small_model();
    let output = model.predict(&array![[1.0, 1.0], [0.0, 2.0]].into_dyn()).unwrap();

    assert_eq!(output.shape(), &[2, 1]);
    assert_relative_eq!(output[[0, 0]], 1.0);
    assert_relative_eq!(output[[1, 0]], -0.5);
}

#[test]
fn test_sequential_propagates_layer_errors() {
    let model = small_model();
    assert!(matches!(
        model.predict(&array![[7.0, 1.0]].into_dyn()),
        Err(ModelError::InvalidArgument(_))
    ));
}

#[test]
fn test_empty_sequential() {
    let model = Sequential::new();
    assert!(model.is_empty());
    assert!(matches!(
        model.predict(&array![[1.0]].into_dyn()),
        Err(ModelError::ProcessingError(_))
    ));
}

#[test]
fn test_sequential_summary_and_weights() {
    let model = small_model();
    assert_eq!(model.len(), 3);
    assert_eq!(model.param_count(), 6 + 0 + 3);

    let types: Vec<&str> = model.layers().map(|layer| layer.layer_type()).collect();
    assert_eq!(types, vec!["Embedding", "GlobalAveragePooling1D", "Dense"]);

    let table = model.summary_table();
    assert!(table.contains("Layer (Embedding)"));
    assert!(table.contains("Layer_2 (Dense)"));
    assert!(table.contains("Total params: 9 (36 B)"));
    assert!(table.starts_with("Model: \"sequential\"\n┏"));

    let shapes: Vec<String> = model.layers().map(|layer| layer.output_shape()).collect();
    assert_eq!(shapes, vec!["(None, 2, 2)", "(None, ?)", "(None, 1)"]);
    for shape in &shapes {
        assert!(table.contains(shape.as_str()));
    }
    // One line per layer between the header and the footer
    assert_eq!(table.lines().count(), 4 + 3 + 2);

    let weights = model.get_weights();
    assert_eq!(weights.len(), 3);
    assert!(matches!(weights[1], LayerWeight::Empty));
}
