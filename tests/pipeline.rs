mod common;

use common::stubs::ScriptedClassifier;
use common::synthetic_image::{count_set, draw_bar, scratched, uniform};
use crack_mask::backend::NativeBackend;
use crack_mask::pipeline::{ComponentCleaner, RegionFiller};
use crack_mask::{codec, ClassifierError, CrackMaskPipeline, Mask, PipelineConfig, PipelineError};

fn default_pipeline() -> CrackMaskPipeline {
    CrackMaskPipeline::new(PipelineConfig::default()).unwrap()
}

#[test]
fn classifier_is_called_once_per_tile() {
    let pipeline = default_pipeline();
    let classifier = ScriptedClassifier::constant(0.0, 224);
    let out = pipeline.run(&uniform(672, 448, 128), &classifier).unwrap();

    assert_eq!(classifier.calls(), (448 / 224) * (672 / 224));
    assert_eq!(out.scan.patches, 6);
    assert_eq!(out.scan.positive_patches, 0);
}

#[test]
fn clipped_edge_tiles_are_resized_before_classification() {
    let pipeline = default_pipeline();
    // The stub rejects any patch that is not 224x224x3.
    let classifier = ScriptedClassifier::constant(1.0, 224);
    let out = pipeline.run(&scratched(300, 250), &classifier).unwrap();

    assert_eq!(classifier.calls(), 4);
    assert_eq!(out.scan.positive_patches, 4);
}

#[test]
fn every_product_shares_the_input_dimensions() {
    let pipeline = default_pipeline();
    for (w, h) in [(224, 224), (300, 250), (231, 460)] {
        let image = scratched(w, h);
        let out = pipeline.run(&image, &ScriptedClassifier::constant(0.9, 224)).unwrap();
        assert_eq!(out.edge_mask.dimensions(), (w, h));
        assert_eq!(out.filled_mask.dimensions(), (w, h));
        assert_eq!(out.cleaned_mask.dimensions(), (w, h));
        assert_eq!(out.overlay.dimensions(), (w, h));
    }
}

#[test]
fn cleaned_mask_is_a_subset_of_filled_mask() {
    let out = default_pipeline()
        .run(&scratched(448, 448), &ScriptedClassifier::constant(1.0, 224))
        .unwrap();
    assert!(count_set(&out.filled_mask) > 0);
    for (c, f) in out.cleaned_mask.pixels().zip(out.filled_mask.pixels()) {
        if c.0[0] > 0 {
            assert!(f.0[0] > 0);
        }
    }
}

#[test]
fn overlay_only_changes_masked_pixels() {
    let image = scratched(448, 224);
    let out = default_pipeline().run(&image, &ScriptedClassifier::constant(1.0, 224)).unwrap();
    assert!(count_set(&out.cleaned_mask) > 0);

    let mut changed = 0;
    for ((o, i), m) in out.overlay.pixels().zip(image.pixels()).zip(out.cleaned_mask.pixels()) {
        if m.0[0] == 0 {
            assert_eq!(o, i);
        } else {
            // Red channel never drops and green/blue never rise under a red blend.
            assert!(o.0[0] >= i.0[0].min(255 / 2));
            assert!(o.0[1] <= i.0[1] && o.0[2] <= i.0[2]);
            changed += 1;
        }
    }
    assert!(changed > 0);
}

#[test]
fn region_filler_leaves_an_empty_mask_empty() {
    let filled = RegionFiller::default().fill(&NativeBackend::default(), &Mask::new(300, 200));
    assert_eq!(count_set(&filled), 0);
}

#[test]
fn cleaner_with_zero_min_area_is_identity() {
    let out = default_pipeline()
        .run(&scratched(448, 448), &ScriptedClassifier::constant(1.0, 224))
        .unwrap();
    let (cleaned, _) = ComponentCleaner::new(0).clean(&NativeBackend::default(), &out.filled_mask);
    assert_eq!(cleaned, out.filled_mask);
}

#[test]
fn uniform_gray_with_negative_classifier_is_untouched() {
    let image = uniform(224, 224, 128);
    let classifier = ScriptedClassifier::constant(0.0, 224);
    let out = default_pipeline().run(&image, &classifier).unwrap();

    assert_eq!(classifier.calls(), 1);
    assert_eq!(count_set(&out.edge_mask), 0);
    assert_eq!(count_set(&out.filled_mask), 0);
    assert_eq!(count_set(&out.cleaned_mask), 0);
    assert_eq!(out.overlay, image);
}

#[test]
fn single_positive_patch_localizes_edges() {
    let mut image = uniform(448, 448, 200);
    draw_bar(&mut image, 40, 180, 100, 3, [30, 30, 30]);
    // Patch order is (0,0), (224,0), (0,224), (224,224); only the first fires.
    let classifier = ScriptedClassifier::new(vec![1.0, 0.0, 0.0, 0.0], 224);
    let out = default_pipeline().run(&image, &classifier).unwrap();

    assert_eq!(out.scan.positive_patches, 1);
    assert!(count_set(&out.edge_mask) > 0);
    for (x, y, p) in out.edge_mask.enumerate_pixels() {
        if p.0[0] > 0 {
            assert!(x < 224 && y < 224, "edge pixel outside the positive patch at ({x}, {y})");
        }
    }
    assert!(count_set(&out.cleaned_mask) >= 50);
    assert!(out.clean.components_kept >= 1);
}

#[test]
fn positive_patch_without_texture_adds_nothing() {
    let image = uniform(224, 224, 90);
    let out = default_pipeline().run(&image, &ScriptedClassifier::constant(1.0, 224)).unwrap();
    assert_eq!(out.scan.positive_patches, 1);
    assert_eq!(count_set(&out.edge_mask), 0);
    assert_eq!(out.overlay, image);
}

#[test]
fn invalid_upload_never_reaches_the_pipeline() {
    let err = codec::decode_image(b"GIF89a but not really").unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
    assert!(err.is_client_error());
}

#[test]
fn smaller_min_area_keeps_at_least_as_much() {
    let image = scratched(448, 448);
    let loose = CrackMaskPipeline::new(PipelineConfig { min_area: 0, ..Default::default() }).unwrap();
    let strict = CrackMaskPipeline::new(PipelineConfig { min_area: 5_000, ..Default::default() }).unwrap();

    let a = loose.run(&image, &ScriptedClassifier::constant(1.0, 224)).unwrap();
    let b = strict.run(&image, &ScriptedClassifier::constant(1.0, 224)).unwrap();
    assert_eq!(a.cleaned_mask, a.filled_mask);
    assert!(count_set(&b.cleaned_mask) <= count_set(&a.cleaned_mask));
}

#[test]
fn nan_or_out_of_range_probability_fails_the_run() {
    let pipeline = default_pipeline();
    for p in [f64::NAN, 1.5] {
        let err = pipeline.run(&scratched(300, 250), &ScriptedClassifier::constant(p, 224)).unwrap_err();
        assert!(matches!(err, PipelineError::Classifier(ClassifierError::InvalidProbability(_))));
        assert!(!err.is_client_error());
    }
}
