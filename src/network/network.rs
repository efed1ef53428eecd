use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{ClassifierError, ModelError};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a randomly initialized network from (size, input_size, activation) tuples.
    pub fn new(layer_specs: Vec<(usize, usize, ActivationFunction)>) -> Network {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation))
            .collect();
        Network { layers, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    /// Number of values the first layer consumes.
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(Layer::input_size)
    }

    /// Number of values the last layer produces.
    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|l| l.size)
    }

    /// Checks every layer's tables and that each layer consumes what the
    /// previous one produces.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.layers.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer
                .check_shape()
                .map_err(|reason| ClassifierError::MalformedModel(format!("layer {}: {}", i, reason)))?;
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].size != pair[1].input_size() {
                return Err(ClassifierError::MalformedModel(format!(
                    "layer {} produces {} values but layer {} consumes {}",
                    i,
                    pair[0].size,
                    i + 1,
                    pair[1].input_size()
                )));
            }
        }
        Ok(())
    }

    /// Read-only forward pass.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if self.layers.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current).ok_or(ClassifierError::InputShape {
                expected: layer.input_size(),
                actual: current.len(),
            })?;
        }
        Ok(current)
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), ModelError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network, ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
