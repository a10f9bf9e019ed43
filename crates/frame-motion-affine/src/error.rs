/// Errors returned by the robust motion estimator.
#[derive(thiserror::Error, Debug)]
pub enum EstimateError {
    #[error("not enough correspondences for motion estimation (got {got}, need at least 3)")]
    InsufficientCorrespondences { got: usize },

    #[error("no motion model reached {required} inliers (best candidate had {best})")]
    ModelNotFound { best: usize, required: usize },
}
