use frame_motion::{
    estimate_frame_motion, GrayImage, MotionPipelineParams, PipelineError,
};

/// Smooth two-dimensional texture with structure everywhere; `(dx, dy)`
/// shifts the pattern, so `textured(.., 5.0, 3.0)` is `textured(.., 0, 0)`
/// translated by exactly (5, 3) pixels.
fn textured(w: usize, h: usize, dx: f32, dy: f32) -> GrayImage {
    GrayImage::from_fn(w, h, |px, py| {
        let x = px as f32 - dx;
        let y = py as f32 - dy;
        let v = 127.0
            + 55.0 * (0.35 * x).sin() * (0.29 * y).cos()
            + 35.0 * (0.11 * x + 0.07 * y).sin();
        v.clamp(0.0, 255.0) as u8
    })
}

#[test]
fn recovers_pure_translation_end_to_end() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(100, 100, 5.0, 3.0);
    let params = MotionPipelineParams::default();

    let estimate =
        estimate_frame_motion(&reference.as_view(), &target.as_view(), &params).expect("pipeline");

    assert!(
        estimate.selected >= 10,
        "only {} features selected",
        estimate.selected
    );
    assert!(
        estimate.correspondences.len() as f64 >= 0.9 * estimate.selected as f64,
        "tracked {}/{}",
        estimate.correspondences.len(),
        estimate.selected
    );

    let t = &estimate.model.transform;
    assert!((t.tx - 5.0).abs() < 0.5, "tx = {}", t.tx);
    assert!((t.ty - 3.0).abs() < 0.5, "ty = {}", t.ty);
    assert!((t.scale() - 1.0).abs() < 0.01, "scale = {}", t.scale());
    assert!(t.rotation().abs() < 0.01, "rotation = {}", t.rotation());

    assert!(
        estimate.inlier_ratio() >= 0.9,
        "inlier ratio {}",
        estimate.inlier_ratio()
    );
}

#[test]
fn inliers_reproject_within_threshold_end_to_end() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(100, 100, 4.0, -2.0);
    let params = MotionPipelineParams::default();

    let estimate =
        estimate_frame_motion(&reference.as_view(), &target.as_view(), &params).expect("pipeline");

    for (c, &inl) in estimate
        .correspondences
        .iter()
        .zip(&estimate.model.inliers)
    {
        if inl {
            let d = (estimate.model.transform.apply(c.origin.position) - c.destination).norm();
            assert!(
                (d as f64) <= params.estimate.inlier_threshold,
                "inlier reprojects {d} px off"
            );
        }
    }
}

#[test]
fn identical_inputs_and_seed_are_bit_identical() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(100, 100, 5.0, 3.0);
    let params = MotionPipelineParams::default();

    let a = estimate_frame_motion(&reference.as_view(), &target.as_view(), &params)
        .expect("first run");
    let b = estimate_frame_motion(&reference.as_view(), &target.as_view(), &params)
        .expect("second run");

    assert_eq!(a, b);
}

#[test]
fn flat_reference_reports_no_features() {
    let reference = GrayImage::from_fn(80, 80, |_, _| 127);
    let target = textured(80, 80, 0.0, 0.0);

    match estimate_frame_motion(
        &reference.as_view(),
        &target.as_view(),
        &MotionPipelineParams::default(),
    ) {
        Err(PipelineError::NoFeaturesFound) => {}
        other => panic!("expected NoFeaturesFound, got {other:?}"),
    }
}

#[test]
fn fewer_than_three_survivors_never_reach_estimation() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(100, 100, 2.0, 1.0);
    let mut params = MotionPipelineParams::default();
    params.features.max_count = 2;

    match estimate_frame_motion(&reference.as_view(), &target.as_view(), &params) {
        Err(PipelineError::InsufficientCorrespondences { got }) => assert!(got <= 2),
        other => panic!("expected InsufficientCorrespondences, got {other:?}"),
    }
}

#[test]
fn unrelated_target_cannot_produce_a_model() {
    // A constant target gives the tracker nothing to lock on to: every
    // point is either lost outright or too few survive for estimation.
    let reference = textured(100, 100, 0.0, 0.0);
    let target = GrayImage::from_fn(100, 100, |_, _| 127);

    match estimate_frame_motion(
        &reference.as_view(),
        &target.as_view(),
        &MotionPipelineParams::default(),
    ) {
        Err(PipelineError::TrackingAllLost { .. })
        | Err(PipelineError::InsufficientCorrespondences { .. })
        | Err(PipelineError::Estimate(_)) => {}
        Ok(est) => panic!(
            "expected failure against a flat target, got a model with {} inliers",
            est.model.inlier_count()
        ),
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn mismatched_frame_sizes_are_rejected() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(90, 100, 0.0, 0.0);

    match estimate_frame_motion(
        &reference.as_view(),
        &target.as_view(),
        &MotionPipelineParams::default(),
    ) {
        Err(PipelineError::FrameSizeMismatch { ref_width, tgt_width, .. }) => {
            assert_eq!(ref_width, 100);
            assert_eq!(tgt_width, 90);
        }
        other => panic!("expected FrameSizeMismatch, got {other:?}"),
    }
}

#[test]
fn overlay_renders_one_arrow_per_inlier() {
    let reference = textured(100, 100, 0.0, 0.0);
    let target = textured(100, 100, 5.0, 3.0);
    let params = MotionPipelineParams::default();

    let estimate =
        estimate_frame_motion(&reference.as_view(), &target.as_view(), &params).expect("pipeline");
    let overlay = estimate.overlay(&reference.as_view());

    assert_eq!(overlay.width, 100);
    assert_eq!(overlay.height, 100);
    let green = overlay
        .data
        .chunks_exact(3)
        .filter(|px| px[0] == 0 && px[1] == 255 && px[2] == 0)
        .count();
    assert!(green > 0, "expected arrow pixels in the overlay");
}
