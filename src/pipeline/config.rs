use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Side length of a classifier patch in pixels.
pub const PATCH_SIZE: u32 = 224;
/// Patches scoring strictly above this are treated as positive.
pub const THRESHOLD: f64 = 0.5;
/// Millimetres per pixel. Reserved; nothing in the pipeline consumes it.
pub const SCALE_MM_PER_PIXEL: f64 = 0.1;
/// Minimum component area the full pipeline keeps.
pub const PIPELINE_MIN_AREA: u32 = 50;
/// Minimum component area of a standalone `ComponentCleaner::default()`.
pub const DEFAULT_COMPONENT_MIN_AREA: u32 = 100;

/// Tunables for a pipeline run. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub patch_size: u32,
    pub threshold: f64,
    /// Canny hysteresis thresholds.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Elliptical closing element (odd side length) and repeat count.
    pub close_kernel: u32,
    pub close_iterations: usize,
    /// Elliptical element for the boundary-thickening dilation.
    pub dilate_kernel: u32,
    pub dilate_iterations: usize,
    pub min_area: u32,
    /// Weight of the highlight colour in the overlay blend.
    pub overlay_alpha: f32,
    pub highlight: [u8; 3],
    pub scale_mm_per_pixel: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            patch_size: PATCH_SIZE,
            threshold: THRESHOLD,
            canny_low: 50.0,
            canny_high: 150.0,
            close_kernel: 7,
            close_iterations: 2,
            dilate_kernel: 3,
            dilate_iterations: 1,
            min_area: PIPELINE_MIN_AREA,
            overlay_alpha: 0.5,
            highlight: [255, 0, 0],
            scale_mm_per_pixel: SCALE_MM_PER_PIXEL,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |msg: String| Err(PipelineError::InvalidConfig(msg));

        if self.patch_size == 0 {
            return invalid("patch_size must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return invalid(format!("threshold {} is outside [0, 1]", self.threshold));
        }
        // imageproc's canny panics unless low <= high, and NaN compares false.
        let finite = self.canny_low.is_finite() && self.canny_high.is_finite();
        if !finite || self.canny_low < 0.0 || self.canny_low > self.canny_high {
            return invalid(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} and {}",
                self.canny_low, self.canny_high
            ));
        }
        for (name, size) in [("close_kernel", self.close_kernel), ("dilate_kernel", self.dilate_kernel)] {
            if size == 0 || size % 2 == 0 {
                return invalid(format!("{} must be a positive odd size, got {}", name, size));
            }
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return invalid(format!("overlay_alpha {} is outside [0, 1]", self.overlay_alpha));
        }
        if !(self.scale_mm_per_pixel.is_finite() && self.scale_mm_per_pixel > 0.0) {
            return invalid(format!("scale_mm_per_pixel must be positive, got {}", self.scale_mm_per_pixel));
        }
        Ok(())
    }
}
