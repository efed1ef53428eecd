use crate::backend::{ImageBackend, Mask, StructuringElement};
use crate::pipeline::config::PipelineConfig;

/// Turns an edge mask into solid regions: close gaps, thicken boundaries,
/// then fill enclosed holes.
#[derive(Debug, Clone)]
pub struct RegionFiller {
    pub close_element: StructuringElement,
    pub close_iterations: usize,
    pub dilate_element: StructuringElement,
    pub dilate_iterations: usize,
}

impl Default for RegionFiller {
    fn default() -> Self {
        RegionFiller::from_config(&PipelineConfig::default())
    }
}

impl RegionFiller {
    pub fn from_config(config: &PipelineConfig) -> RegionFiller {
        RegionFiller {
            close_element: StructuringElement::ellipse(config.close_kernel),
            close_iterations: config.close_iterations,
            dilate_element: StructuringElement::ellipse(config.dilate_kernel),
            dilate_iterations: config.dilate_iterations,
        }
    }

    pub fn fill<B: ImageBackend + ?Sized>(&self, backend: &B, edge_mask: &Mask) -> Mask {
        let closed = backend.morphological_close(edge_mask, &self.close_element, self.close_iterations);
        let thick = backend.morphological_dilate(&closed, &self.dilate_element, self.dilate_iterations);
        backend.fill_holes(&thick)
    }
}
