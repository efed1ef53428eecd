//! Error types shared by the pipeline, the classifier seam and model loading.

use thiserror::Error;

/// A failure raised by a patch classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The patch tensor does not have the length the model consumes.
    #[error("classifier expects {expected} input values, got {actual}")]
    InputShape { expected: usize, actual: usize },

    /// The model produced an output vector that is not a single probability.
    #[error("classifier produced {actual} outputs; expected 1 or 2")]
    OutputShape { actual: usize },

    /// The model produced NaN or a value outside [0, 1].
    #[error("classifier produced an invalid probability: {0}")]
    InvalidProbability(f64),

    /// The model has no layers.
    #[error("model has no layers")]
    EmptyModel,

    /// A weight or bias table disagrees with its declared shape, or two
    /// consecutive layers do not chain.
    #[error("malformed model: {0}")]
    MalformedModel(String),

    /// The model does not declare an input this pipeline can feed.
    #[error("unsupported model input: {0}")]
    UnsupportedInput(String),
}

/// A failure that aborts a whole pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Upload bytes could not be decoded into an image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The upload was empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The classifier failed on a well-formed patch.
    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// A stage produced a mask whose dimensions diverge from the image.
    #[error("{stage} produced a {actual:?} mask for a {expected:?} image")]
    ShapeMismatch {
        stage: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The overlay could not be encoded.
    #[error("failed to encode overlay: {0}")]
    Encode(#[source] image::ImageError),

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Whether the failure was caused by the caller's input rather than the
    /// service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Decode(_) | PipelineError::EmptyInput)
    }
}

/// A failure while loading or saving a model file.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("model file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
