use std::time::Instant;

use image::RgbImage;
use tracing::{info, info_span};

use crate::backend::{ImageBackend, Mask, NativeBackend};
use crate::classifier::Classifier;
use crate::error::PipelineError;
use crate::pipeline::cleaner::{CleanStats, ComponentCleaner};
use crate::pipeline::compositor::Compositor;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::region_filler::RegionFiller;
use crate::pipeline::scan::{PatchScanner, ScanSummary};

/// Every intermediate product of one run, plus the overlay.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub edge_mask: Mask,
    pub filled_mask: Mask,
    pub cleaned_mask: Mask,
    pub overlay: RgbImage,
    pub scan: ScanSummary,
    pub clean: CleanStats,
}

/// Scan → fill → clean → composite, strictly in that order.
///
/// The pipeline holds only configuration and the numeric backend; the
/// classifier is borrowed per run so one loaded model serves every request.
#[derive(Debug, Clone)]
pub struct CrackMaskPipeline<B: ImageBackend = NativeBackend> {
    config: PipelineConfig,
    backend: B,
    scanner: PatchScanner,
    filler: RegionFiller,
    cleaner: ComponentCleaner,
    compositor: Compositor,
}

impl CrackMaskPipeline<NativeBackend> {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        CrackMaskPipeline::with_backend(config, NativeBackend::default())
    }
}

impl<B: ImageBackend> CrackMaskPipeline<B> {
    pub fn with_backend(config: PipelineConfig, backend: B) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(CrackMaskPipeline {
            scanner: PatchScanner::from_config(&config),
            filler: RegionFiller::from_config(&config),
            cleaner: ComponentCleaner::new(config.min_area),
            compositor: Compositor::from_config(&config),
            config,
            backend,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, image: &RgbImage, classifier: &dyn Classifier) -> Result<PipelineOutput, PipelineError> {
        let (width, height) = image.dimensions();
        let _span = info_span!("crack_mask", width, height).entered();
        let started = Instant::now();

        let (edge_mask, scan) = self.scanner.scan(&self.backend, image, classifier)?;
        ensure_same_shape("patch scan", image, &edge_mask)?;

        let filled_mask = self.filler.fill(&self.backend, &edge_mask);
        ensure_same_shape("region filler", image, &filled_mask)?;

        let (cleaned_mask, clean) = self.cleaner.clean(&self.backend, &filled_mask);
        ensure_same_shape("component cleaner", image, &cleaned_mask)?;

        let overlay = self.compositor.composite(image, &cleaned_mask)?;

        info!(
            patches = scan.patches,
            positive_patches = scan.positive_patches,
            components = clean.components,
            components_kept = clean.components_kept,
            masked_pixels = clean.masked_pixels,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline finished"
        );

        Ok(PipelineOutput { edge_mask, filled_mask, cleaned_mask, overlay, scan, clean })
    }

    /// Runs the pipeline and keeps only the overlay.
    pub fn overlay(&self, image: &RgbImage, classifier: &dyn Classifier) -> Result<RgbImage, PipelineError> {
        self.run(image, classifier).map(|out| out.overlay)
    }
}

fn ensure_same_shape(stage: &'static str, image: &RgbImage, mask: &Mask) -> Result<(), PipelineError> {
    if image.dimensions() != mask.dimensions() {
        return Err(PipelineError::ShapeMismatch {
            stage,
            expected: image.dimensions(),
            actual: mask.dimensions(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LabelMap, StructuringElement};
    use crate::classifier::PatchTensor;
    use crate::error::ClassifierError;

    struct Always(f64);

    impl Classifier for Always {
        fn classify(&self, _patch: &PatchTensor) -> Result<f64, ClassifierError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn classify(&self, patch: &PatchTensor) -> Result<f64, ClassifierError> {
            Err(ClassifierError::InputShape { expected: 1, actual: patch.len() })
        }
    }

    /// Backend whose filler shrinks the mask, to exercise the shape guard.
    struct ShrinkingBackend(NativeBackend);

    impl ImageBackend for ShrinkingBackend {
        fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
            self.0.resize(image, width, height)
        }
        fn detect_edges(&self, image: &RgbImage, low: f32, high: f32) -> Mask {
            self.0.detect_edges(image, low, high)
        }
        fn morphological_close(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask {
            self.0.morphological_close(mask, element, iterations)
        }
        fn morphological_dilate(&self, mask: &Mask, element: &StructuringElement, iterations: usize) -> Mask {
            self.0.morphological_dilate(mask, element, iterations)
        }
        fn fill_holes(&self, mask: &Mask) -> Mask {
            Mask::new(mask.width() / 2, mask.height())
        }
        fn label_connected_components(&self, mask: &Mask) -> (LabelMap, u32) {
            self.0.label_connected_components(mask)
        }
    }

    #[test]
    fn classifier_failure_aborts_the_run() {
        let pipeline = CrackMaskPipeline::new(PipelineConfig { patch_size: 8, ..Default::default() }).unwrap();
        let image = RgbImage::new(16, 16);
        assert!(matches!(
            pipeline.run(&image, &Failing),
            Err(PipelineError::Classifier(ClassifierError::InputShape { .. }))
        ));
    }

    #[test]
    fn shape_divergence_is_reported_not_composited() {
        let config = PipelineConfig { patch_size: 8, ..Default::default() };
        let pipeline = CrackMaskPipeline::with_backend(config, ShrinkingBackend(NativeBackend::default())).unwrap();
        let err = pipeline.run(&RgbImage::new(16, 16), &Always(0.0)).unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { stage: "region filler", .. }));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = PipelineConfig { dilate_kernel: 4, ..Default::default() };
        assert!(matches!(CrackMaskPipeline::new(config), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn threshold_is_strict() {
        let pipeline = CrackMaskPipeline::new(PipelineConfig { patch_size: 8, ..Default::default() }).unwrap();
        let out = pipeline.run(&RgbImage::new(16, 8), &Always(0.5)).unwrap();
        assert_eq!(out.scan, ScanSummary { patches: 2, positive_patches: 0 });
    }
}
