use image::{Rgb, RgbImage};

use crate::backend::Mask;
use crate::error::PipelineError;
use crate::pipeline::config::PipelineConfig;

/// Blends a highlight colour into the image wherever the mask is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compositor {
    pub alpha: f32,
    pub highlight: Rgb<u8>,
}

impl Default for Compositor {
    fn default() -> Self {
        Compositor::from_config(&PipelineConfig::default())
    }
}

impl Compositor {
    pub fn from_config(config: &PipelineConfig) -> Compositor {
        Compositor { alpha: config.overlay_alpha, highlight: Rgb(config.highlight) }
    }

    /// Returns a new overlay; `image` is left untouched. Blended channels are
    /// `floor((1 - alpha) * pixel + alpha * highlight)`.
    pub fn composite(&self, image: &RgbImage, mask: &Mask) -> Result<RgbImage, PipelineError> {
        if image.dimensions() != mask.dimensions() {
            return Err(PipelineError::ShapeMismatch {
                stage: "compositor",
                expected: image.dimensions(),
                actual: mask.dimensions(),
            });
        }

        let mut overlay = image.clone();
        for (pixel, m) in overlay.pixels_mut().zip(mask.pixels()) {
            if m.0[0] == 0 {
                continue;
            }
            for (c, h) in pixel.0.iter_mut().zip(self.highlight.0.iter()) {
                let blended = (1.0 - self.alpha) * *c as f32 + self.alpha * *h as f32;
                *c = blended.floor().clamp(0.0, 255.0) as u8;
            }
        }
        Ok(overlay)
    }
}
