use std::sync::atomic::{AtomicUsize, Ordering};

use crack_mask::{Classifier, ClassifierError, PatchTensor};

/// Returns `script[i]` on the i-th call and `fallback` once the script runs
/// out. Tiles are visited row-major, so index = row * columns + column.
///
/// Also asserts every patch it sees has the full patch length, so tests catch
/// a scanner that forgets to resize clipped edge tiles.
pub struct ScriptedClassifier {
    script: Vec<f64>,
    fallback: f64,
    patch_len: usize,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<f64>, patch_size: u32) -> ScriptedClassifier {
        ScriptedClassifier {
            script,
            fallback: 0.0,
            patch_len: (patch_size * patch_size * 3) as usize,
            calls: AtomicUsize::new(0),
        }
    }

    /// Same probability for every patch.
    pub fn constant(probability: f64, patch_size: u32) -> ScriptedClassifier {
        ScriptedClassifier { fallback: probability, ..ScriptedClassifier::new(Vec::new(), patch_size) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, patch: &PatchTensor) -> Result<f64, ClassifierError> {
        if patch.len() != self.patch_len {
            return Err(ClassifierError::InputShape { expected: self.patch_len, actual: patch.len() });
        }
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.script.get(i).copied().unwrap_or(self.fallback))
    }
}
