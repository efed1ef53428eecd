use std::sync::Arc;

use crack_mask::{Classifier, CrackMaskPipeline};

/// Process-wide, read-only service state. Built once in `main` and shared by
/// every request thread; the model is released when the last `Arc` drops at
/// shutdown.
pub struct AppState {
    pub pipeline: CrackMaskPipeline,
    pub classifier: Arc<dyn Classifier>,
    /// Shown by the health endpoint.
    pub model_description: String,
    pub max_upload_bytes: usize,
}

pub type SharedState = Arc<AppState>;
