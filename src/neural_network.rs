/// Module that contains activation function implementations
pub mod activation;
/// Module that contains the inference session handle wrapping a loaded model
pub mod inference_session;
/// Module that contains neural network layer implementations
pub mod layer;
/// Module that parses exported layers-model artifacts (`model.json` plus weight shards)
pub mod model_artifacts;
/// Module that contains implementations for sequential model architecture
pub mod sequential;

pub use activation::*;
pub use inference_session::*;
pub use layer::*;
pub use model_artifacts::*;
pub use sequential::*;

pub use crate::error::{IoError, ModelError};
use ndarray::ArrayD;

/// Type alias for n-dimensional arrays used as tensors in the neural network
pub type Tensor = ArrayD<f32>;

pub use crate::traits::Layer;
