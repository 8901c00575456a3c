pub use crate::neural_network::Tensor;
pub use crate::neural_network::activation::Activation;
pub use crate::neural_network::inference_session::InferenceSession;
pub use crate::neural_network::layer::{
    Dense, Dropout, Embedding, Flatten, GlobalAveragePooling1D, GlobalMaxPooling1D, LSTM,
    LayerWeight,
};
pub use crate::neural_network::model_artifacts::ModelArtifacts;
pub use crate::neural_network::sequential::Sequential;
pub use crate::traits::Layer;
