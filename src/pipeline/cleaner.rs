use image::Luma;

use crate::backend::{ImageBackend, Mask};
use crate::pipeline::config::DEFAULT_COMPONENT_MIN_AREA;

/// Outcome of a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub components: u32,
    pub components_kept: u32,
    pub masked_pixels: u64,
}

/// Drops 8-connected components smaller than `min_area` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentCleaner {
    pub min_area: u32,
}

impl Default for ComponentCleaner {
    fn default() -> Self {
        ComponentCleaner { min_area: DEFAULT_COMPONENT_MIN_AREA }
    }
}

impl ComponentCleaner {
    pub fn new(min_area: u32) -> ComponentCleaner {
        ComponentCleaner { min_area }
    }

    pub fn clean<B: ImageBackend + ?Sized>(&self, backend: &B, filled: &Mask) -> (Mask, CleanStats) {
        let (labels, count) = backend.label_connected_components(filled);

        let mut areas = vec![0u64; count as usize + 1];
        for p in labels.pixels() {
            areas[p.0[0] as usize] += 1;
        }
        let keep: Vec<bool> = areas
            .iter()
            .enumerate()
            .map(|(label, &area)| label != 0 && area >= self.min_area as u64)
            .collect();

        let (width, height) = filled.dimensions();
        let mut cleaned = Mask::new(width, height);
        let mut masked_pixels = 0;
        for (x, y, p) in labels.enumerate_pixels() {
            if keep[p.0[0] as usize] {
                cleaned.put_pixel(x, y, Luma([255]));
                masked_pixels += 1;
            }
        }

        let stats = CleanStats {
            components: areas.iter().skip(1).filter(|&&a| a > 0).count() as u32,
            components_kept: keep.iter().filter(|&&k| k).count() as u32,
            masked_pixels,
        };
        (cleaned, stats)
    }
}
