use frame_motion_affine::EstimateError;

/// Terminal failures of the motion-estimation pipeline.
///
/// Every variant is a typed, recoverable report to the caller; none abort
/// the process, and no partial model accompanies any of them.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(
        "frame size mismatch: reference is {ref_width}x{ref_height}, \
         target is {tgt_width}x{tgt_height}"
    )]
    FrameSizeMismatch {
        ref_width: usize,
        ref_height: usize,
        tgt_width: usize,
        tgt_height: usize,
    },

    #[error("invalid grayscale frame buffer (expected {expected} bytes, got {got})")]
    InvalidFrameBuffer { expected: usize, got: usize },

    #[error("no trackable features found in the reference frame")]
    NoFeaturesFound,

    #[error("tracking lost all {total} selected points")]
    TrackingAllLost { total: usize },

    #[error("only {got} correspondences survived tracking, need at least 3")]
    InsufficientCorrespondences { got: usize },

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}
