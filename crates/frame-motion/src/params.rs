use frame_motion_affine::EstimateParams;
use frame_motion_features::FeatureSelectParams;
use frame_motion_flow::TrackParams;
use serde::{Deserialize, Serialize};

/// Complete configuration for one pipeline invocation.
///
/// There is no ambient or global state anywhere in the pipeline: every
/// run is a pure function of the two frames and this value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MotionPipelineParams {
    /// Feature selection in the reference frame.
    pub features: FeatureSelectParams,
    /// Coarse-to-fine tracking into the target frame.
    pub track: TrackParams,
    /// Robust similarity fitting over the surviving correspondences.
    pub estimate: EstimateParams,
}
