/// Prelude module for text preprocessing utilities.
#[cfg(feature = "utility")]
pub mod utility_prelude;
/// Prelude module for CSV ingestion and export.
#[cfg(feature = "dataset")]
pub mod dataset_prelude;
/// Prelude module for the neural network runtime.
#[cfg(feature = "neural_network")]
pub mod neural_network_prelude;
/// Prelude module for the classification pipeline.
#[cfg(feature = "pipeline")]
pub mod pipeline_prelude;

pub use crate::error::{IoError, ModelError};

#[cfg(feature = "dataset")]
pub use dataset_prelude::*;
#[cfg(feature = "neural_network")]
pub use neural_network_prelude::*;
#[cfg(feature = "pipeline")]
pub use pipeline_prelude::*;
#[cfg(feature = "utility")]
pub use utility_prelude::*;
