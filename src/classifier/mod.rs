pub mod network_classifier;
pub mod preprocess;

use std::sync::Arc;

use crate::error::ClassifierError;

pub use network_classifier::NetworkClassifier;
pub use preprocess::{Normalization, PatchTensor};

/// A pretrained patch classifier, treated as an opaque function from a
/// normalized PatchSize×PatchSize RGB patch to a crack probability.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait Classifier: Send + Sync {
    /// Scaling the patch must be normalized with before `classify`.
    fn normalization(&self) -> Normalization {
        Normalization::UnitRange
    }

    /// Probability in [0, 1] that the patch contains a defect.
    fn classify(&self, patch: &PatchTensor) -> Result<f64, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn normalization(&self) -> Normalization {
        (**self).normalization()
    }

    fn classify(&self, patch: &PatchTensor) -> Result<f64, ClassifierError> {
        (**self).classify(patch)
    }
}
