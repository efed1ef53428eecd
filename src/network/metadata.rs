use serde::{Deserialize, Serialize};

use crate::classifier::preprocess::Normalization;

/// Describes how to interpret the input fed to a Network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputType {
    /// Raw f64 values, not usable as a patch classifier.
    Numeric,
    /// RGB patch resized to width×height, flattened as R,G,B,... per pixel.
    ImageRgb {
        width: u32,
        height: u32,
        #[serde(default)]
        normalization: Normalization,
    },
}

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so bare weight files deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    pub input_type: Option<InputType>,
    /// Class labels for the output layer, e.g. ["intact", "crack"].
    pub output_labels: Option<Vec<String>>,
}
