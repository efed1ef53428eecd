use crate::classifier::preprocess::{Normalization, PatchTensor};
use crate::classifier::Classifier;
use crate::error::{ClassifierError, ModelError};
use crate::network::{InputType, Network};

/// Patch classifier backed by a saved dense [`Network`].
///
/// The model must declare `InputType::ImageRgb` with the pipeline's patch size
/// and end in either one unit (crack probability) or two units
/// (`[intact, crack]`).
#[derive(Debug)]
pub struct NetworkClassifier {
    network: Network,
    normalization: Normalization,
    description: String,
}

impl NetworkClassifier {
    pub fn new(network: Network, patch_size: u32) -> Result<NetworkClassifier, ClassifierError> {
        network.validate()?;
        let input_size = network.input_size().ok_or(ClassifierError::EmptyModel)?;
        let input_type = network
            .metadata
            .as_ref()
            .and_then(|m| m.input_type.clone());

        let normalization = match input_type {
            Some(InputType::ImageRgb { width, height, normalization }) => {
                if width != patch_size || height != patch_size {
                    return Err(ClassifierError::UnsupportedInput(format!(
                        "model expects {}x{} patches, pipeline produces {}x{}",
                        width, height, patch_size, patch_size
                    )));
                }
                normalization
            }
            Some(InputType::Numeric) | None => {
                return Err(ClassifierError::UnsupportedInput(
                    "model does not declare an RGB image input".to_owned(),
                ))
            }
        };

        let expected = (patch_size as usize) * (patch_size as usize) * 3;
        if input_size != expected {
            return Err(ClassifierError::UnsupportedInput(format!(
                "first layer consumes {} values but a {}x{} RGB patch has {}",
                input_size, patch_size, patch_size, expected
            )));
        }

        match network.output_size() {
            Some(1) | Some(2) => {}
            Some(n) => return Err(ClassifierError::OutputShape { actual: n }),
            None => return Err(ClassifierError::EmptyModel),
        }

        let description = network
            .metadata
            .as_ref()
            .and_then(|m| m.description.clone())
            .unwrap_or_else(|| "unnamed model".to_owned());

        Ok(NetworkClassifier { network, normalization, description })
    }

    /// Loads and validates a model file once; the result is shared read-only.
    pub fn load(path: &str, patch_size: u32) -> Result<NetworkClassifier, ModelError> {
        let network = Network::load_json(path)?;
        Ok(NetworkClassifier::new(network, patch_size)?)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Classifier for NetworkClassifier {
    fn normalization(&self) -> Normalization {
        self.normalization
    }

    fn classify(&self, patch: &PatchTensor) -> Result<f64, ClassifierError> {
        let output = self.network.predict(&patch.data)?;
        let probability = match output.as_slice() {
            [p] => *p,
            [_, positive] => *positive,
            other => return Err(ClassifierError::OutputShape { actual: other.len() }),
        };
        if !(0.0..=1.0).contains(&probability) {
            return Err(ClassifierError::InvalidProbability(probability));
        }
        Ok(probability)
    }
}
