use super::*;
use ahash::AHashMap;
use ndarray::{Array1, Array2, Ix1, Ix2, IxDyn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One tensor described by a weights manifest entry
///
/// # Fields
///
/// - `name` - Weight name, `"<layer>/<...>/<kernel|bias|...>"`
/// - `shape` - Tensor shape
/// - `dtype` - Element type; only `float32` can be decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    pub name: String,
    pub shape: Vec<usize>,
    #[serde(default = "default_dtype")]
    pub dtype: String,
}

fn default_dtype() -> String {
    "float32".to_string()
}

impl WeightSpec {
    /// Number of elements of the tensor
    ///
    /// # Returns
    ///
    /// - `Ok(usize)` - Product of the shape dimensions
    /// - `Err(IoError::ModelStructureMismatch)` - If the product overflows `usize`
    pub fn element_count(&self) -> Result<usize, IoError> {
        self.shape
            .iter()
            .try_fold(1usize, |count, &dim| count.checked_mul(dim))
            .ok_or_else(|| {
                IoError::ModelStructureMismatch(format!(
                    "weight '{}' has an oversized shape {:?}",
                    self.name, self.shape
                ))
            })
    }

    /// Number of bytes of the tensor stored as `float32`
    pub fn byte_len(&self) -> Result<usize, IoError> {
        self.element_count()?.checked_mul(4).ok_or_else(|| {
            IoError::ModelStructureMismatch(format!(
                "weight '{}' has an oversized shape {:?}",
                self.name, self.shape
            ))
        })
    }
}

/// A group of weights stored across one or more binary shards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsGroup {
    pub paths: Vec<String>,
    pub weights: Vec<WeightSpec>,
}

/// Configuration of one layer as found in the model topology
///
/// # Fields
///
/// - `class_name` - Keras class name, e.g. `"Dense"`
/// - `name` - Layer name, used to look up its weights
/// - `config` - Raw layer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayerConfig {
    pub class_name: String,
    pub name: String,
    pub config: Value,
}

impl LayerConfig {
    fn usize_field(&self, key: &str) -> Option<usize> {
        self.config.get(key).and_then(Value::as_u64).map(|v| v as usize)
    }

    fn bool_field(&self, key: &str, default: bool) -> bool {
        self.config.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn f32_field(&self, key: &str, default: f32) -> f32 {
        self.config
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(default)
    }

    fn activation_field(&self, key: &str, default: &str) -> Result<Activation, IoError> {
        let name = match self.config.get(key) {
            None | Some(Value::Null) => default,
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(IoError::ModelStructureMismatch(format!(
                    "layer '{}' has an unsupported {} value: {}",
                    self.name, key, other
                )));
            }
        };
        Activation::from_keras_name(name).map_err(|e| structure_error(&self.name, e))
    }

    /// Sequence length declared by `input_length`, `batch_input_shape` or `batch_shape`
    fn declared_input_length(&self) -> Option<usize> {
        if let Some(length) = self.usize_field("input_length") {
            return Some(length);
        }
        ["batch_input_shape", "batch_shape"].iter().find_map(|key| {
            self.config
                .get(*key)
                .and_then(Value::as_array)
                .and_then(|shape| shape.get(1))
                .and_then(Value::as_u64)
                .map(|v| v as usize)
        })
    }
}

/// Raw document layout of `model.json`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelJson {
    model_topology: Value,
    #[serde(default)]
    weights_manifest: Vec<WeightsGroup>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    generated_by: Option<String>,
}

/// Parsed layers-model artifacts: the topology and weights manifest of `model.json`
///
/// The weight bytes themselves live in separate binary shards listed by the manifest; they
/// are read by the caller and handed to [`ModelArtifacts::build_model`].
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
///
/// let json = r#"{
///     "modelTopology": {"class_name": "Sequential", "config": {"layers": [
///         {"class_name": "Dense", "config": {"name": "dense", "units": 1, "activation": "linear"}}
///     ]}},
///     "weightsManifest": [{"paths": ["group1-shard1of1.bin"], "weights": [
///         {"name": "dense/kernel", "shape": [2, 1], "dtype": "float32"},
///         {"name": "dense/bias", "shape": [1], "dtype": "float32"}
///     ]}]
/// }"#;
///
/// let artifacts = ModelArtifacts::from_json_str(json).unwrap();
/// let bytes: Vec<u8> = [1.0f32, 2.0, 0.5].iter().flat_map(|v| v.to_le_bytes()).collect();
/// let model = artifacts.build_model(&bytes).unwrap();
/// assert_eq!(model.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    layers: Vec<LayerConfig>,
    weights_manifest: Vec<WeightsGroup>,
    format: Option<String>,
    generated_by: Option<String>,
}

/// Wraps a layer construction error as a structure mismatch naming the layer
fn structure_error(layer: &str, error: ModelError) -> IoError {
    IoError::ModelStructureMismatch(format!("layer '{}': {}", layer, error))
}

impl ModelArtifacts {
    /// Parses the content of a `model.json` file
    ///
    /// `modelTopology` may hold the model config directly or wrap it in `model_config`;
    /// the model `config` may be `{"layers": [...]}` or a bare list of layers.
    ///
    /// # Returns
    ///
    /// - `Ok(ModelArtifacts)` - The parsed artifacts
    /// - `Err(IoError::JsonError)` - If the document is not valid JSON
    /// - `Err(IoError::ModelStructureMismatch)` - If the topology is not a sequential layer list
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        let document: ModelJson = serde_json::from_str(json)?;

        let topology = document
            .model_topology
            .get("model_config")
            .unwrap_or(&document.model_topology);

        let class_name = topology
            .get("class_name")
            .and_then(Value::as_str)
            .unwrap_or("Sequential");
        if class_name != "Sequential" {
            return Err(IoError::ModelStructureMismatch(format!(
                "only Sequential models are supported, got '{}'",
                class_name
            )));
        }

        let raw_layers = match topology.get("config") {
            Some(Value::Array(layers)) => layers,
            Some(Value::Object(config)) => match config.get("layers") {
                Some(Value::Array(layers)) => layers,
                _ => {
                    return Err(IoError::ModelStructureMismatch(
                        "model config has no layer list".to_string(),
                    ));
                }
            },
            _ => {
                return Err(IoError::ModelStructureMismatch(
                    "model topology has no config".to_string(),
                ));
            }
        };

        let layers = raw_layers
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_layer_config(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            layers,
            weights_manifest: document.weights_manifest,
            format: document.format,
            generated_by: document.generated_by,
        })
    }

    /// Reads and parses a `model.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let content = fs::read_to_string(path.as_ref())?;
        let artifacts = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            layers = artifacts.layers.len(),
            "parsed model topology"
        );
        Ok(artifacts)
    }

    /// Layer configurations in topology order
    pub fn layers(&self) -> &[LayerConfig] {
        &self.layers
    }

    /// Weight groups in manifest order
    pub fn weights_manifest(&self) -> &[WeightsGroup] {
        &self.weights_manifest
    }

    /// Artifact format, typically `"layers-model"`
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Tool that produced the artifacts
    pub fn generated_by(&self) -> Option<&str> {
        self.generated_by.as_deref()
    }

    /// Shard file names in the order their bytes must be concatenated
    pub fn weight_paths(&self) -> Vec<&str> {
        self.weights_manifest
            .iter()
            .flat_map(|group| group.paths.iter().map(String::as_str))
            .collect()
    }

    /// Number of bytes the manifest describes
    ///
    /// # Returns
    ///
    /// - `Ok(usize)` - Sum of the byte lengths of all weights
    /// - `Err(IoError::ModelStructureMismatch)` - If a shape or the total overflows `usize`
    pub fn total_weight_bytes(&self) -> Result<usize, IoError> {
        self.weights_manifest
            .iter()
            .flat_map(|group| group.weights.iter())
            .try_fold(0usize, |total, spec| {
                total.checked_add(spec.byte_len()?).ok_or_else(|| {
                    IoError::ModelStructureMismatch(
                        "weights manifest describes more bytes than addressable".to_string(),
                    )
                })
            })
    }

    /// Sequence length the model was exported with, if the topology declares one
    ///
    /// Taken from the first layer declaring `input_length`, `batch_input_shape` or
    /// `batch_shape`.
    pub fn expected_input_length(&self) -> Option<usize> {
        self.layers.iter().find_map(LayerConfig::declared_input_length)
    }

    /// Reads every shard listed in the manifest from `base_dir` and concatenates them
    pub fn read_weight_bytes(&self, base_dir: impl AsRef<Path>) -> Result<Vec<u8>, IoError> {
        let mut bytes = Vec::with_capacity(self.total_weight_bytes()?);
        for shard in self.weight_paths() {
            let shard_path = base_dir.as_ref().join(shard);
            let mut data = fs::read(&shard_path)?;
            tracing::debug!(shard = %shard_path.display(), bytes = data.len(), "read weight shard");
            bytes.append(&mut data);
        }
        Ok(bytes)
    }

    /// Splits concatenated shard bytes into named little-endian `float32` tensors
    ///
    /// # Returns
    ///
    /// - `Ok(AHashMap)` - Weight name to tensor
    /// - `Err(IoError::ModelStructureMismatch)` - On an unsupported dtype or if the byte count
    ///   does not match the manifest
    pub fn decode_weights(&self, weight_bytes: &[u8]) -> Result<AHashMap<String, Tensor>, IoError> {
        let expected = self.total_weight_bytes()?;
        if weight_bytes.len() != expected {
            return Err(IoError::ModelStructureMismatch(format!(
                "weight data has {} bytes, manifest describes {}",
                weight_bytes.len(),
                expected
            )));
        }

        let mut weights = AHashMap::new();
        let mut offset = 0;
        for spec in self.weights_manifest.iter().flat_map(|group| group.weights.iter()) {
            if spec.dtype != "float32" {
                return Err(IoError::ModelStructureMismatch(format!(
                    "weight '{}' has unsupported dtype '{}'",
                    spec.name, spec.dtype
                )));
            }

            let byte_len = spec.byte_len()?;
            let values: Vec<f32> = weight_bytes[offset..offset + byte_len]
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            offset += byte_len;

            let tensor = Tensor::from_shape_vec(IxDyn(&spec.shape), values)
                .map_err(|e| IoError::ModelStructureMismatch(format!("weight '{}': {}", spec.name, e)))?;
            weights.insert(spec.name.clone(), tensor);
        }
        Ok(weights)
    }

    /// Builds a `Sequential` model from the topology and the concatenated shard bytes
    ///
    /// # Parameters
    ///
    /// * `weight_bytes` - All shards concatenated in manifest order
    ///
    /// # Returns
    ///
    /// - `Ok(Sequential)` - The model, one layer per topology entry except `InputLayer`
    /// - `Err(IoError::ModelStructureMismatch)` - On an unknown layer class, a missing
    ///   weight, a weight of the wrong shape or weight data that does not match the manifest
    pub fn build_model(&self, weight_bytes: &[u8]) -> Result<Sequential, IoError> {
        let mut weights = self.decode_weights(weight_bytes)?;
        let mut model = Sequential::new();

        for layer in &self.layers {
            match build_layer(layer, &mut weights)? {
                Some(built) => {
                    tracing::debug!(layer = %layer.name, class = %layer.class_name, "built layer");
                    model.add_boxed(built);
                }
                None => continue,
            }
        }

        if !weights.is_empty() {
            let mut unused: Vec<&str> = weights.keys().map(String::as_str).collect();
            unused.sort_unstable();
            tracing::warn!(?unused, "weights in the manifest were not used by any layer");
        }

        Ok(model)
    }
}

/// Reads `{class_name, config: {name, ...}}` from one topology entry
fn parse_layer_config(index: usize, raw: &Value) -> Result<LayerConfig, IoError> {
    let class_name = raw
        .get("class_name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            IoError::ModelStructureMismatch(format!("layer {} has no class_name", index))
        })?;
    let config = raw.get("config").cloned().unwrap_or(Value::Null);
    let name = config
        .get("name")
        .or_else(|| raw.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_{}", class_name.to_lowercase(), index));

    Ok(LayerConfig {
        class_name: class_name.to_string(),
        name,
        config,
    })
}

/// Removes the weight of `layer` whose name ends with `/<suffix>`
fn take_weight(
    weights: &mut AHashMap<String, Tensor>,
    layer: &str,
    suffix: &str,
) -> Option<Tensor> {
    let prefix = format!("{}/", layer);
    let ending = format!("/{}", suffix);
    let key = weights
        .keys()
        .find(|name| name.starts_with(&prefix) && name.ends_with(&ending))
        .cloned()?;
    weights.remove(&key)
}

fn require_matrix(
    weights: &mut AHashMap<String, Tensor>,
    layer: &str,
    suffix: &str,
) -> Result<Array2<f32>, IoError> {
    let tensor = take_weight(weights, layer, suffix).ok_or_else(|| {
        IoError::ModelStructureMismatch(format!("layer '{}' is missing weight '{}'", layer, suffix))
    })?;
    tensor.into_dimensionality::<Ix2>().map_err(|_| {
        IoError::ModelStructureMismatch(format!("layer '{}': weight '{}' must be 2D", layer, suffix))
    })
}

fn optional_vector(
    weights: &mut AHashMap<String, Tensor>,
    layer: &str,
    suffix: &str,
) -> Result<Option<Array1<f32>>, IoError> {
    take_weight(weights, layer, suffix)
        .map(|tensor| {
            tensor.into_dimensionality::<Ix1>().map_err(|_| {
                IoError::ModelStructureMismatch(format!(
                    "layer '{}': weight '{}' must be 1D",
                    layer, suffix
                ))
            })
        })
        .transpose()
}

/// Rejects layers whose data format is not channels-last
fn require_channels_last(layer: &LayerConfig) -> Result<(), IoError> {
    match layer.config.get("data_format").and_then(Value::as_str) {
        None | Some("channels_last") => Ok(()),
        Some(other) => Err(IoError::ModelStructureMismatch(format!(
            "layer '{}' uses unsupported data_format '{}'",
            layer.name, other
        ))),
    }
}

/// Builds one layer; `Ok(None)` for layers that have no runtime counterpart
fn build_layer(
    layer: &LayerConfig,
    weights: &mut AHashMap<String, Tensor>,
) -> Result<Option<Box<dyn Layer>>, IoError> {
    let name = layer.name.as_str();
    let built: Box<dyn Layer> = match layer.class_name.as_str() {
        "InputLayer" => return Ok(None),
        "Embedding" => {
            let embeddings = require_matrix(weights, name, "embeddings")?;
            Box::new(
                Embedding::from_weights(embeddings, layer.declared_input_length())
                    .map_err(|e| structure_error(name, e))?,
            )
        }
        "Dense" => {
            let kernel = require_matrix(weights, name, "kernel")?;
            let units = kernel.ncols();
            let bias = optional_vector(weights, name, "bias")?.unwrap_or_else(|| Array1::zeros(units));
            let activation = layer.activation_field("activation", "linear")?;
            Box::new(Dense::from_weights(kernel, bias, activation).map_err(|e| structure_error(name, e))?)
        }
        "Dropout" => Box::new(Dropout::new(layer.f32_field("rate", 0.0)).map_err(|e| structure_error(name, e))?),
        "SpatialDropout1D" => Box::new(
            Dropout::spatial_1d(layer.f32_field("rate", 0.0)).map_err(|e| structure_error(name, e))?,
        ),
        "Flatten" => {
            require_channels_last(layer)?;
            Box::new(Flatten::new())
        }
        "GlobalAveragePooling1D" => {
            require_channels_last(layer)?;
            Box::new(GlobalAveragePooling1D::new())
        }
        "GlobalMaxPooling1D" => {
            require_channels_last(layer)?;
            Box::new(GlobalMaxPooling1D::new())
        }
        "LSTM" => {
            if layer.bool_field("go_backwards", false) || layer.bool_field("stateful", false) {
                return Err(IoError::ModelStructureMismatch(format!(
                    "layer '{}': backwards or stateful LSTM is not supported",
                    name
                )));
            }
            let kernel = require_matrix(weights, name, "kernel")?;
            let recurrent_kernel = require_matrix(weights, name, "recurrent_kernel")?;
            let bias = optional_vector(weights, name, "bias")?;
            Box::new(
                LSTM::from_keras_weights(
                    kernel,
                    recurrent_kernel,
                    bias,
                    layer.activation_field("activation", "tanh")?,
                    layer.activation_field("recurrent_activation", "sigmoid")?,
                    layer.bool_field("return_sequences", false),
                )
                .map_err(|e| structure_error(name, e))?,
            )
        }
        other => {
            return Err(IoError::ModelStructureMismatch(format!(
                "layer '{}' has unsupported class '{}'",
                name, other
            )));
        }
    };
    Ok(Some(built))
}
