//! Numeric operations the pipeline needs, behind a substitutable backend.

pub mod fill;
pub mod morphology;
pub mod native;

use image::{GrayImage, ImageBuffer, Luma, RgbImage};

pub use morphology::StructuringElement;
pub use native::NativeBackend;

/// Binary mask; 0 is background, 255 is foreground.
pub type Mask = GrayImage;

/// Per-pixel component labels; 0 is background.
pub type LabelMap = ImageBuffer<Luma<u32>, Vec<u32>>;

/// The image operations the crack pipeline is written against.
pub trait ImageBackend: Send + Sync {
    /// Resizes to exactly `width`×`height`.
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;

    /// Hysteresis edge detection on the grayscale of `image`.
    fn detect_edges(&self, image: &RgbImage, low: f32, high: f32) -> Mask;

    /// `iterations` dilations followed by `iterations` erosions.
    fn morphological_close(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask;

    fn morphological_dilate(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask;

    /// Fills background regions not connected to the border.
    fn fill_holes(&self, mask: &Mask) -> Mask;

    /// Labels 8-connected foreground components. Returns the label map and
    /// the highest label assigned.
    fn label_connected_components(&self, mask: &Mask) -> (LabelMap, u32);
}
