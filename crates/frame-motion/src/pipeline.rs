use crate::error::PipelineError;
use crate::params::MotionPipelineParams;
use frame_motion_affine::{estimate_motion, MotionModel};
use frame_motion_core::{Correspondence, GrayImageView};
use frame_motion_draw::{draw_motion_overlay, RgbOverlay};
use frame_motion_features::select_features;
use frame_motion_flow::{retain_tracked, track_features};
use log::{debug, info};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Result of one pipeline invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEstimate {
    /// Fitted transform plus the inlier mask over `correspondences`.
    pub model: MotionModel,
    /// Successfully tracked correspondences, in selection order; the
    /// model's inlier mask aligns with this list index-for-index.
    pub correspondences: Vec<Correspondence>,
    /// Number of features originally selected in the reference frame.
    pub selected: usize,
}

impl MotionEstimate {
    /// Fraction of surviving correspondences the model explains.
    pub fn inlier_ratio(&self) -> f64 {
        if self.correspondences.is_empty() {
            return 0.0;
        }
        self.model.inlier_count() as f64 / self.correspondences.len() as f64
    }

    /// Render the inlier motion vectors over the reference frame.
    pub fn overlay(&self, reference: &GrayImageView<'_>) -> RgbOverlay {
        draw_motion_overlay(reference, &self.correspondences, &self.model.inliers)
    }
}

/// Estimate the motion between two grayscale frames of equal size.
///
/// Runs the full pipeline: corner selection in the reference frame,
/// coarse-to-fine tracking into the target frame, dropping of lost
/// points, and robust similarity fitting over the survivors. Stateless
/// and deterministic for a fixed `params.estimate.seed`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(reference, target, params), fields(width = reference.width, height = reference.height))
)]
pub fn estimate_frame_motion(
    reference: &GrayImageView<'_>,
    target: &GrayImageView<'_>,
    params: &MotionPipelineParams,
) -> Result<MotionEstimate, PipelineError> {
    if reference.width != target.width || reference.height != target.height {
        return Err(PipelineError::FrameSizeMismatch {
            ref_width: reference.width,
            ref_height: reference.height,
            tgt_width: target.width,
            tgt_height: target.height,
        });
    }

    let features = select_features(reference, &params.features);
    if features.is_empty() {
        return Err(PipelineError::NoFeaturesFound);
    }
    debug!("selected {} features", features.len());

    let correspondences = track_features(reference, target, &features, &params.track);
    let surviving = retain_tracked(correspondences);
    if surviving.is_empty() {
        return Err(PipelineError::TrackingAllLost {
            total: features.len(),
        });
    }
    if surviving.len() < 3 {
        return Err(PipelineError::InsufficientCorrespondences {
            got: surviving.len(),
        });
    }

    let model = estimate_motion(&surviving, &params.estimate)?;
    info!(
        "motion model: scale {:.4}, rotation {:.4} rad, translation ({:.2}, {:.2}), {}/{} inliers",
        model.transform.scale(),
        model.transform.rotation(),
        model.transform.tx,
        model.transform.ty,
        model.inlier_count(),
        surviving.len()
    );

    Ok(MotionEstimate {
        model,
        correspondences: surviving,
        selected: features.len(),
    })
}
