use image::{imageops, RgbImage};
use tracing::debug;

use crate::backend::{ImageBackend, Mask};
use crate::classifier::{Classifier, PatchTensor};
use crate::error::{ClassifierError, PipelineError};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::tiles::{tiles, Tile};

/// Counts gathered while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub patches: usize,
    pub positive_patches: usize,
}

/// Tiles the image, classifies each tile and accumulates edges of the
/// positive ones into the edge mask.
#[derive(Debug, Clone, Copy)]
pub struct PatchScanner {
    pub patch_size: u32,
    pub threshold: f64,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl PatchScanner {
    pub fn from_config(config: &PipelineConfig) -> PatchScanner {
        PatchScanner {
            patch_size: config.patch_size,
            threshold: config.threshold,
            canny_low: config.canny_low,
            canny_high: config.canny_high,
        }
    }

    pub fn scan<B: ImageBackend + ?Sized>(
        &self,
        backend: &B,
        image: &RgbImage,
        classifier: &dyn Classifier,
    ) -> Result<(Mask, ScanSummary), PipelineError> {
        let (width, height) = image.dimensions();
        let mut edge_mask = Mask::new(width, height);
        let mut summary = ScanSummary::default();
        let normalization = classifier.normalization();

        for tile in tiles(width, height, self.patch_size) {
            summary.patches += 1;
            let patch = imageops::crop_imm(image, tile.x, tile.y, tile.width, tile.height).to_image();
            let resized = backend.resize(&patch, self.patch_size, self.patch_size);
            let tensor = PatchTensor::from_rgb(&resized, normalization);
            let probability = classifier.classify(&tensor)?;
            // NaN fails the range check too, so it never reads as a negative.
            if !(0.0..=1.0).contains(&probability) {
                return Err(ClassifierError::InvalidProbability(probability).into());
            }

            if probability > self.threshold {
                summary.positive_patches += 1;
                debug!(x = tile.x, y = tile.y, probability, "positive patch");
                // Edges come from the native-resolution tile, not the resized one.
                let edges = backend.detect_edges(&patch, self.canny_low, self.canny_high);
                accumulate_max(&mut edge_mask, &edges, tile)?;
            }
        }

        Ok((edge_mask, summary))
    }
}

/// ORs `patch_edges` into `mask` at the tile's location with a pixel-wise
/// maximum. Applying the same patch twice leaves the mask unchanged.
pub fn accumulate_max(mask: &mut Mask, patch_edges: &Mask, tile: Tile) -> Result<(), PipelineError> {
    if patch_edges.dimensions() != (tile.width, tile.height) {
        return Err(PipelineError::ShapeMismatch {
            stage: "edge detector",
            expected: (tile.width, tile.height),
            actual: patch_edges.dimensions(),
        });
    }
    for (dx, dy, edge) in patch_edges.enumerate_pixels() {
        let target = mask.get_pixel_mut(tile.x + dx, tile.y + dy);
        target.0[0] = target.0[0].max(edge.0[0]);
    }
    Ok(())
}
