//! Conversion of a resized RGB patch into the value layout a classifier reads.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Pixel scaling a classifier was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// `x / 255`, values in [0, 1].
    #[default]
    UnitRange,
    /// `x / 127.5 - 1`, values in [-1, 1] (MobileNet-style).
    SignedUnit,
}

impl Normalization {
    pub fn scale(self, sample: u8) -> f64 {
        match self {
            Normalization::UnitRange => sample as f64 / 255.0,
            Normalization::SignedUnit => sample as f64 / 127.5 - 1.0,
        }
    }
}

/// Classifier input: a normalized patch in HWC order.
///
/// Only constructible from an `RgbImage`, so channel order is always R, G, B.
#[derive(Debug, Clone)]
pub struct PatchTensor {
    pub width: u32,
    pub height: u32,
    pub normalization: Normalization,
    pub data: Vec<f64>,
}

impl PatchTensor {
    pub fn from_rgb(patch: &RgbImage, normalization: Normalization) -> PatchTensor {
        let data = patch
            .pixels()
            .flat_map(|p| p.0.iter().map(move |&c| normalization.scale(c)))
            .collect();
        PatchTensor {
            width: patch.width(),
            height: patch.height(),
            normalization,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
