use super::*;

/// Embedding(3 x 2) -> GlobalAveragePooling1D -> Dense(2 -> 1, sigmoid), wrapped in `model_config`
const WRAPPED_MODEL_JSON: &str = r#"{
    "format": "layers-model",
    "generatedBy": "keras v2.12.0",
    "modelTopology": {
        "keras_version": "2.12.0",
        "backend": "tensorflow",
        "model_config": {
            "class_name": "Sequential",
            "config": {
                "name": "sequential",
                "layers": [
                    {"class_name": "InputLayer", "config": {"batch_input_shape": [null, 4], "dtype": "float32", "name": "embedding_input"}},
                    {"class_name": "Embedding", "config": {"name": "embedding", "input_dim": 3, "output_dim": 2, "input_length": 4}},
                    {"class_name": "GlobalAveragePooling1D", "config": {"name": "global_average_pooling1d", "data_format": "channels_last"}},
                    {"class_name": "Dropout", "config": {"name": "dropout", "rate": 0.2}},
                    {"class_name": "Dense", "config": {"name": "dense", "units": 1, "activation": "sigmoid", "use_bias": true}}
                ]
            }
        }
    },
    "weightsManifest": [{
        "paths": ["group1-shard1of1.bin"],
        "weights": [
            {"name": "embedding/embeddings", "shape": [3, 2], "dtype": "float32"},
            {"name": "dense/kernel", "shape": [2, 1], "dtype": "float32"},
            {"name": "dense/bias", "shape": [1], "dtype": "float32"}
        ]
    }]
}"#;

fn wrapped_weights() -> Vec<u8> {
    f32_bytes(&[0.0, 0.0, 2.0, 2.0, -2.0, -2.0, 1.0, 1.0, 0.0])
}

#[test]
fn test_parse_wrapped_topology() {
    let artifacts = ModelArtifacts::from_json_str(WRAPPED_MODEL_JSON).unwrap();

    let classes: Vec<&str> = artifacts.layers().iter().map(|l| l.class_name.as_str()).collect();
    assert_eq!(
        classes,
        vec!["InputLayer", "Embedding", "GlobalAveragePooling1D", "Dropout", "Dense"]
    );
    assert_eq!(artifacts.layers()[1].name, "embedding");
    assert_eq!(artifacts.expected_input_length(), Some(4));
    assert_eq!(artifacts.weight_paths(), vec!["group1-shard1of1.bin"]);
    assert_eq!(artifacts.total_weight_bytes().unwrap(), 9 * 4);
    assert_eq!(artifacts.format(), Some("layers-model"));
    assert_eq!(artifacts.generated_by(), Some("keras v2.12.0"));
}

#[test]
fn test_build_model_from_wrapped_topology() {
    let artifacts = ModelArtifacts::from_json_str(WRAPPED_MODEL_JSON).unwrap();
    let model = artifacts.build_model(&wrapped_weights()).unwrap();

    // InputLayer has no runtime counterpart
    assert_eq!(model.len(), 4);

    let output = model
        .predict(&array![[1.0, 1.0, 0.0, 0.0], [2.0, 2.0, 2.0, 2.0]].into_dyn())
        .unwrap();
    // Row 0 averages to [1, 1] -> sigmoid(2); row 1 averages to [-2, -2] -> sigmoid(-4)
    assert_relative_eq!(output[[0, 0]], sigmoid(2.0), epsilon = 1e-6);
    assert_relative_eq!(output[[1, 0]], sigmoid(-4.0), epsilon = 1e-6);
}

#[test]
fn test_parse_bare_layer_list() {
    let json = r#"{
        "modelTopology": {
            "class_name": "Sequential",
            "config": [
                {"class_name": "Flatten", "config": {"name": "flatten", "batch_input_shape": [null, 2, 2]}},
                {"class_name": "Dense", "config": {"name": "dense_1", "units": 2, "activation": "softmax", "use_bias": false}}
            ]
        },
        "weightsManifest": [{
            "paths": ["a.bin"],
            "weights": [{"name": "dense_1/kernel", "shape": [4, 2], "dtype": "float32"}]
        }]
    }"#;

    let artifacts = ModelArtifacts::from_json_str(json).unwrap();
    assert_eq!(artifacts.expected_input_length(), Some(2));

    let model = artifacts.build_model(&f32_bytes(&[1.0; 8])).unwrap();
    let output = model.predict(&Array::ones((1, 2, 2)).into_dyn()).unwrap();
    assert_relative_eq!(output[[0, 0]], 0.5);
}

#[test]
fn test_build_lstm_layer() {
    let json = r#"{
        "modelTopology": {"class_name": "Sequential", "config": {"layers": [
            {"class_name": "Embedding", "config": {"name": "embedding", "input_dim": 2, "output_dim": 1}},
            {"class_name": "LSTM", "config": {"name": "lstm", "units": 1, "activation": "tanh", "recurrent_activation": "sigmoid", "return_sequences": false}}
        ]}},
        "weightsManifest": [{"paths": ["w.bin"], "weights": [
            {"name": "embedding/embeddings", "shape": [2, 1], "dtype": "float32"},
            {"name": "lstm/lstm_cell/kernel", "shape": [1, 4], "dtype": "float32"},
            {"name": "lstm/lstm_cell/recurrent_kernel", "shape": [1, 4], "dtype": "float32"},
            {"name": "lstm/lstm_cell/bias", "shape": [4], "dtype": "float32"}
        ]}]
    }"#;

    let artifacts = ModelArtifacts::from_json_str(json).unwrap();
    assert_eq!(artifacts.expected_input_length(), None);

    let bytes = f32_bytes(&[
        0.0, 1.0, // embeddings
        0.0, 0.0, 1.0, 0.0, // kernel: only the cell gate
        0.0, 0.0, 0.0, 0.0, // recurrent kernel
        0.0, 0.0, 0.0, 0.0, // bias
    ]);
    let model = artifacts.build_model(&bytes).unwrap();
    let output = model.predict(&array![[1.0]].into_dyn()).unwrap();
    assert_relative_eq!(output[[0, 0]], 0.181_699_74, epsilon = 1e-5);
}

#[test]
fn test_unknown_layer_class_is_rejected() {
    let json = r#"{"modelTopology": {"class_name": "Sequential", "config": {"layers": [
        {"class_name": "Conv1D", "config": {"name": "conv1d"}}
    ]}}}"#;
    let artifacts = ModelArtifacts::from_json_str(json).unwrap();

    match artifacts.build_model(&[]) {
        Err(IoError::ModelStructureMismatch(msg)) => assert!(msg.contains("Conv1D")),
        other => panic!("expected ModelStructureMismatch, got {:?}", other.map(|m| m.len())),
    }
}

#[test]
fn test_non_sequential_topology_is_rejected() {
    let json = r#"{"modelTopology": {"class_name": "Functional", "config": {"layers": []}}}"#;
    assert!(matches!(
        ModelArtifacts::from_json_str(json),
        Err(IoError::ModelStructureMismatch(_))
    ));
    assert!(matches!(
        ModelArtifacts::from_json_str(r#"{"modelTopology": {}}"#),
        Err(IoError::ModelStructureMismatch(_))
    ));
    assert!(matches!(
        ModelArtifacts::from_json_str("{"),
        Err(IoError::JsonError(_))
    ));
}

#[test]
fn test_weight_data_errors() {
    let artifacts = ModelArtifacts::from_json_str(WRAPPED_MODEL_JSON).unwrap();

    // Short data
    let mut short = wrapped_weights();
    short.truncate(20);
    assert!(matches!(
        artifacts.build_model(&short),
        Err(IoError::ModelStructureMismatch(_))
    ));

    // Wrong shape for the dense bias
    let json = WRAPPED_MODEL_JSON.replace(
        r#"{"name": "dense/bias", "shape": [1], "dtype": "float32"}"#,
        r#"{"name": "dense/bias", "shape": [2], "dtype": "float32"}"#,
    );
    let artifacts = ModelArtifacts::from_json_str(&json).unwrap();
    let mut bytes = wrapped_weights();
    bytes.extend(f32_bytes(&[0.0]));
    assert!(matches!(
        artifacts.build_model(&bytes),
        Err(IoError::ModelStructureMismatch(_))
    ));

    // Unsupported dtype
    let json = WRAPPED_MODEL_JSON.replace(
        r#"{"name": "dense/bias", "shape": [1], "dtype": "float32"}"#,
        r#"{"name": "dense/bias", "shape": [1], "dtype": "int32"}"#,
    );
    let artifacts = ModelArtifacts::from_json_str(&json).unwrap();
    assert!(matches!(
        artifacts.build_model(&wrapped_weights()),
        Err(IoError::ModelStructureMismatch(_))
    ));
}

#[test]
fn test_oversized_weight_shape_is_rejected() {
    let json = WRAPPED_MODEL_JSON.replace(
        r#"{"name": "dense/bias", "shape": [1], "dtype": "float32"}"#,
        r#"{"name": "dense/bias", "shape": [4294967296, 4294967296], "dtype": "float32"}"#,
    );
    let artifacts = ModelArtifacts::from_json_str(&json).unwrap();

    assert!(matches!(
        artifacts.weights_manifest()[0].weights[2].element_count(),
        Err(IoError::ModelStructureMismatch(_))
    ));
    assert!(matches!(
        artifacts.total_weight_bytes(),
        Err(IoError::ModelStructureMismatch(_))
    ));
    match artifacts.build_model(&[]) {
        Err(IoError::ModelStructureMismatch(msg)) => assert!(msg.contains("dense/bias")),
        _ => panic!("expected an oversized shape error"),
    }

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        artifacts.read_weight_bytes(dir.path()),
        Err(IoError::ModelStructureMismatch(_))
    ));
}

#[test]
fn test_missing_weight_is_rejected() {
    let json = WRAPPED_MODEL_JSON.replace(
        r#"{"name": "dense/kernel", "shape": [2, 1], "dtype": "float32"},"#,
        "",
    );
    let artifacts = ModelArtifacts::from_json_str(&json).unwrap();
    let bytes = f32_bytes(&[0.0, 0.0, 2.0, 2.0, -2.0, -2.0, 0.0]);

    match artifacts.build_model(&bytes) {
        Err(IoError::ModelStructureMismatch(msg)) => assert!(msg.contains("kernel")),
        _ => panic!("expected a missing kernel error"),
    }
}

#[test]
fn test_read_weight_bytes_concatenates_shards() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{
        "modelTopology": {"class_name": "Sequential", "config": {"layers": [
            {"class_name": "Dense", "config": {"name": "dense", "units": 1, "activation": "linear"}}
        ]}},
        "weightsManifest": [{"paths": ["group1-shard1of2.bin", "group1-shard2of2.bin"], "weights": [
            {"name": "dense/kernel", "shape": [2, 1], "dtype": "float32"},
            {"name": "dense/bias", "shape": [1], "dtype": "float32"}
        ]}]
    }"#;
    let model_path = dir.path().join("model.json");
    std::fs::write(&model_path, json).unwrap();
    std::fs::write(dir.path().join("group1-shard1of2.bin"), f32_bytes(&[2.0, 3.0])).unwrap();
    std::fs::write(dir.path().join("group1-shard2of2.bin"), f32_bytes(&[1.0])).unwrap();

    let artifacts = ModelArtifacts::from_file(&model_path).unwrap();
    let bytes = artifacts.read_weight_bytes(dir.path()).unwrap();
    let model = artifacts.build_model(&bytes).unwrap();

    let output = model.predict(&array![[1.0, 1.0]].into_dyn()).unwrap();
    assert_relative_eq!(output[[0, 0]], 6.0);

    // A missing shard is an I/O error
    std::fs::remove_file(dir.path().join("group1-shard2of2.bin")).unwrap();
    assert!(matches!(
        artifacts.read_weight_bytes(dir.path()),
        Err(IoError::StdIoError(_))
    ));
}
