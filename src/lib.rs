pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod classifier;
pub mod backend;
pub mod pipeline;
pub mod codec;
pub mod error;
pub mod logging;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{InputType, ModelMetadata, Network};
pub use classifier::{Classifier, NetworkClassifier, Normalization, PatchTensor};
pub use backend::{ImageBackend, Mask, NativeBackend, StructuringElement};
pub use pipeline::{CrackMaskPipeline, PipelineConfig, PipelineOutput};
pub use error::{ClassifierError, ModelError, PipelineError};
