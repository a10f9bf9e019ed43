use crate::error::EstimateError;
use crate::params::EstimateParams;
use crate::solve::fit_similarity;
use crate::transform::SimilarityTransform;
use frame_motion_core::Correspondence;
use log::debug;
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Motion estimate over a filtered correspondence set: the fitted
/// transform plus an inlier mask aligned index-for-index with the input.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionModel {
    pub transform: SimilarityTransform,
    pub inliers: Vec<bool>,
}

impl MotionModel {
    pub fn inlier_count(&self) -> usize {
        self.inliers.iter().filter(|&&m| m).count()
    }
}

/// Minimal correspondence count below which estimation is not attempted.
const MIN_CORRESPONDENCES: usize = 3;

/// Redraws allowed per iteration before a degenerate sample counts
/// against the iteration budget.
const DEGENERATE_RETRIES: usize = 16;

/// Sampled origins closer than this (pixels) are considered coincident.
const MIN_SAMPLE_SEPARATION: f32 = 1e-3;

/// Fit a 4-DOF similarity to the correspondences by randomized-sampling
/// consensus with a least-squares refit over the winning inlier set.
///
/// Sampling is driven entirely by `params.seed`; repeated calls with the
/// same inputs return the same model. The first candidate to reach the
/// best inlier count wins ties, consistent with sequential enumeration.
pub fn estimate_motion(
    correspondences: &[Correspondence],
    params: &EstimateParams,
) -> Result<MotionModel, EstimateError> {
    let n = correspondences.len();
    if n < MIN_CORRESPONDENCES {
        return Err(EstimateError::InsufficientCorrespondences { got: n });
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let threshold_sq = params.inlier_threshold * params.inlier_threshold;

    let mut best: Option<(usize, SimilarityTransform, Vec<bool>)> = None;
    let mut needed = params.max_iterations;
    let mut iteration = 0;

    while iteration < needed {
        iteration += 1;

        let Some((i, j)) = draw_pair(&mut rng, correspondences) else {
            continue;
        };
        let sample = [
            pair_of(&correspondences[i]),
            pair_of(&correspondences[j]),
        ];
        let Some(candidate) = fit_similarity(&sample) else {
            continue;
        };

        let (count, mask) = score(correspondences, &candidate, threshold_sq);
        if best.as_ref().map_or(true, |(best_count, _, _)| count > *best_count) {
            best = Some((count, candidate, mask));
            needed = needed.min(iterations_for_ratio(
                count as f64 / n as f64,
                params.confidence,
            ));
        }
    }

    let (best_count, best_transform, best_mask) = best.ok_or(EstimateError::ModelNotFound {
        best: 0,
        required: params.min_inliers,
    })?;

    if best_count < params.min_inliers {
        return Err(EstimateError::ModelNotFound {
            best: best_count,
            required: params.min_inliers,
        });
    }

    debug!(
        "consensus found {best_count}/{n} inliers after {iteration} iterations, refitting"
    );

    // Refit over all inliers of the winning candidate, then recompute the
    // mask against the refit transform so the returned mask is consistent
    // with the returned matrix.
    let support: Vec<(Point2<f32>, Point2<f32>)> = correspondences
        .iter()
        .zip(&best_mask)
        .filter(|(_, &m)| m)
        .map(|(c, _)| pair_of(c))
        .collect();

    let (transform, inliers) = match fit_similarity(&support) {
        Some(refit) => {
            let (_, mask) = score(correspondences, &refit, threshold_sq);
            (refit, mask)
        }
        // Degenerate refit support (e.g. all inliers coincident); keep the
        // minimal-sample candidate, whose mask is already consistent.
        None => (best_transform, best_mask),
    };

    Ok(MotionModel { transform, inliers })
}

fn pair_of(c: &Correspondence) -> (Point2<f32>, Point2<f32>) {
    (c.origin.position, c.destination)
}

/// Draw two distinct, non-coincident correspondence indices, redrawing a
/// bounded number of times on degenerate configurations.
fn draw_pair(rng: &mut StdRng, correspondences: &[Correspondence]) -> Option<(usize, usize)> {
    let n = correspondences.len();
    for _ in 0..DEGENERATE_RETRIES {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i == j {
            continue;
        }
        let separation = (correspondences[i].origin.position
            - correspondences[j].origin.position)
            .norm();
        if separation < MIN_SAMPLE_SEPARATION {
            continue;
        }
        return Some((i, j));
    }
    None
}

fn score(
    correspondences: &[Correspondence],
    transform: &SimilarityTransform,
    threshold_sq: f64,
) -> (usize, Vec<bool>) {
    let mut mask = Vec::with_capacity(correspondences.len());
    let mut count = 0;
    for c in correspondences {
        let projected = transform.apply(c.origin.position);
        let d = projected - c.destination;
        let inlier = (d.norm_squared() as f64) <= threshold_sq;
        if inlier {
            count += 1;
        }
        mask.push(inlier);
    }
    (count, mask)
}

/// Iterations needed so that, with probability `confidence`, at least one
/// 2-point sample was drawn purely from inliers at the observed ratio.
fn iterations_for_ratio(inlier_ratio: f64, confidence: f64) -> usize {
    if inlier_ratio <= 0.0 {
        return usize::MAX;
    }
    let p_clean = (inlier_ratio * inlier_ratio).min(1.0);
    if p_clean >= 1.0 {
        return 1;
    }
    let denom = (1.0 - p_clean).ln();
    if denom >= 0.0 {
        return usize::MAX;
    }
    let needed = ((1.0 - confidence).ln() / denom).ceil();
    if needed.is_finite() && needed > 0.0 {
        needed as usize
    } else {
        1
    }
}
