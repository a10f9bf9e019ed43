use crate::params::TrackParams;
use frame_motion_core::{
    sample_bilinear, Correspondence, FeaturePoint, GrayImageView, ImagePyramid,
};
use log::debug;
use nalgebra::{Point2, Vector2};

/// Locate each origin point in the target frame by coarse-to-fine
/// least-squares refinement of the brightness-constancy residual.
///
/// Every point is tracked independently against the same pair of pyramids;
/// failures are per-point (`tracked = false`), never fatal to the batch.
pub fn track_features(
    reference: &GrayImageView<'_>,
    target: &GrayImageView<'_>,
    origins: &[FeaturePoint],
    params: &TrackParams,
) -> Vec<Correspondence> {
    let ref_pyr = ImagePyramid::build(reference, params.pyramid_levels);
    let tgt_pyr = ImagePyramid::build(target, params.pyramid_levels);
    let levels = usable_levels(&ref_pyr, &tgt_pyr, params);

    let out: Vec<Correspondence> = origins
        .iter()
        .map(|origin| track_single(&ref_pyr, &tgt_pyr, levels, origin, params))
        .collect();

    let tracked = out.iter().filter(|c| c.tracked).count();
    debug!("tracked {tracked}/{} points", out.len());

    out
}

/// Drop coarsest levels whose resolution cannot hold a full tracking
/// window anywhere; refining there would be meaningless for every point.
fn usable_levels(ref_pyr: &ImagePyramid, tgt_pyr: &ImagePyramid, params: &TrackParams) -> usize {
    let min_side = 2 * (params.window_margin() as usize) + 4;
    let mut levels = ref_pyr.num_levels().min(tgt_pyr.num_levels());
    while levels > 1 {
        let lvl = ref_pyr.level(levels - 1);
        if lvl.width >= min_side && lvl.height >= min_side {
            break;
        }
        levels -= 1;
    }
    levels
}

/// Outcome of the per-level iteration, carrying the refined displacement
/// in the coordinates of that level.
enum LevelStep {
    Refined { converged: bool },
    OutOfBounds,
    Singular,
}

fn track_single(
    ref_pyr: &ImagePyramid,
    tgt_pyr: &ImagePyramid,
    levels: usize,
    origin: &FeaturePoint,
    params: &TrackParams,
) -> Correspondence {
    let margin = params.window_margin();

    // Displacement estimate in the coordinates of the level being refined;
    // starts at zero at the coarsest level, doubled on each descent.
    let mut d = Vector2::<f32>::zeros();
    let mut converged_finest = false;
    let mut failed = false;

    for k in (0..levels).rev() {
        let scale = ref_pyr.scale_at(k);
        let center = Point2::new(origin.position.x * scale, origin.position.y * scale);

        let step = refine_at_level(
            &ref_pyr.level(k),
            &tgt_pyr.level(k),
            center,
            &mut d,
            margin,
            params,
        );

        match step {
            LevelStep::Refined { converged } => {
                if k == 0 {
                    converged_finest = converged;
                } else {
                    d *= 2.0;
                }
            }
            LevelStep::OutOfBounds | LevelStep::Singular if k > 0 => {
                // A window that does not fit (or has no texture) at a
                // coarse level is refined at the finer levels only; the
                // current estimate is carried down untouched.
                d *= 2.0;
            }
            LevelStep::OutOfBounds | LevelStep::Singular => {
                failed = true;
            }
        }
    }

    let destination = origin.position + d;
    let base_ref = ref_pyr.level(0);
    let base_tgt = tgt_pyr.level(0);

    let residual = window_rms_residual(
        &base_ref,
        &base_tgt,
        origin.position,
        d,
        params.window_radius,
    );

    let tracked = !failed
        && converged_finest
        && residual <= params.max_residual
        && base_tgt.window_in_bounds(destination.x, destination.y, margin);

    Correspondence {
        origin: *origin,
        destination,
        tracked,
        residual,
    }
}

/// Iterative refinement at one pyramid level.
///
/// The window gradients are taken from the reference (template) patch, so
/// the 2x2 normal matrix is constant across iterations; each iteration
/// only re-samples the displaced target window and solves for the update.
fn refine_at_level(
    reference: &GrayImageView<'_>,
    target: &GrayImageView<'_>,
    center: Point2<f32>,
    d: &mut Vector2<f32>,
    margin: f32,
    params: &TrackParams,
) -> LevelStep {
    if !reference.window_in_bounds(center.x, center.y, margin) {
        return LevelStep::OutOfBounds;
    }

    let r = params.window_radius as i32;
    let patch = (2 * params.window_radius + 1) * (2 * params.window_radius + 1);
    let mut template = vec![0.0f32; patch];
    let mut grad_x = vec![0.0f32; patch];
    let mut grad_y = vec![0.0f32; patch];

    let mut sxx = 0.0f32;
    let mut sxy = 0.0f32;
    let mut syy = 0.0f32;

    let mut idx = 0;
    for dy in -r..=r {
        for dx in -r..=r {
            let tx = center.x + dx as f32;
            let ty = center.y + dy as f32;
            template[idx] = sample_bilinear(reference, tx, ty);
            let gx = 0.5
                * (sample_bilinear(reference, tx + 1.0, ty)
                    - sample_bilinear(reference, tx - 1.0, ty));
            let gy = 0.5
                * (sample_bilinear(reference, tx, ty + 1.0)
                    - sample_bilinear(reference, tx, ty - 1.0));
            grad_x[idx] = gx;
            grad_y[idx] = gy;
            sxx += gx * gx;
            sxy += gx * gy;
            syy += gy * gy;
            idx += 1;
        }
    }

    let det = sxx * syy - sxy * sxy;
    if det.abs() < params.min_determinant {
        return LevelStep::Singular;
    }
    let inv_det = 1.0 / det;

    for _ in 0..params.max_iterations {
        let wx = center.x + d.x;
        let wy = center.y + d.y;
        if !target.window_in_bounds(wx, wy, margin) {
            return LevelStep::OutOfBounds;
        }

        let mut b0 = 0.0f32;
        let mut b1 = 0.0f32;
        let mut idx = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                let e = template[idx] - sample_bilinear(target, wx + dx as f32, wy + dy as f32);
                b0 += grad_x[idx] * e;
                b1 += grad_y[idx] * e;
                idx += 1;
            }
        }

        let step_x = inv_det * (syy * b0 - sxy * b1);
        let step_y = inv_det * (sxx * b1 - sxy * b0);
        d.x += step_x;
        d.y += step_y;

        if step_x * step_x + step_y * step_y < params.epsilon * params.epsilon {
            return LevelStep::Refined { converged: true };
        }
    }

    LevelStep::Refined { converged: false }
}

/// RMS brightness difference between the reference window at `center` and
/// the target window displaced by `d`, at base resolution.
fn window_rms_residual(
    reference: &GrayImageView<'_>,
    target: &GrayImageView<'_>,
    center: Point2<f32>,
    d: Vector2<f32>,
    window_radius: usize,
) -> f32 {
    let r = window_radius as i32;
    let mut sum_sq = 0.0f32;
    let mut n = 0u32;
    for dy in -r..=r {
        for dx in -r..=r {
            let tx = center.x + dx as f32;
            let ty = center.y + dy as f32;
            let e = sample_bilinear(reference, tx, ty)
                - sample_bilinear(target, tx + d.x, ty + d.y);
            sum_sq += e * e;
            n += 1;
        }
    }
    (sum_sq / n as f32).sqrt()
}
