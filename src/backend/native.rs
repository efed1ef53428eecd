use image::imageops::{self, FilterType};
use image::{Luma, RgbImage};
use imageproc::edges::canny;
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::backend::{fill, morphology, ImageBackend, LabelMap, Mask, StructuringElement};

/// CPU backend built on `image` and `imageproc`.
#[derive(Debug, Clone, Copy)]
pub struct NativeBackend {
    pub resize_filter: FilterType,
}

impl Default for NativeBackend {
    fn default() -> Self {
        NativeBackend { resize_filter: FilterType::Triangle }
    }
}

impl ImageBackend for NativeBackend {
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        imageops::resize(image, width, height, self.resize_filter)
    }

    fn detect_edges(&self, image: &RgbImage, low: f32, high: f32) -> Mask {
        let gray = imageops::grayscale(image);
        canny(&gray, low, high)
    }

    fn morphological_close(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask {
        morphology::close(mask, element, iterations)
    }

    fn morphological_dilate(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask {
        morphology::dilate(mask, element, iterations)
    }

    fn fill_holes(&self, mask: &Mask) -> Mask {
        fill::fill_holes(mask)
    }

    fn label_connected_components(&self, mask: &Mask) -> (LabelMap, u32) {
        let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));
        let count = labels.pixels().map(|p| p.0[0]).max().unwrap_or(0);
        (labels, count)
    }
}
