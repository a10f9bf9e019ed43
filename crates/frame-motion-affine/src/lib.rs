//! Robust 4-DOF motion estimation from sparse correspondences.
//!
//! Fits a similarity transform (uniform scale + rotation + translation)
//! to tracked point correspondences by seeded randomized-sampling
//! consensus: minimal 2-point candidates, inlier scoring against a
//! reprojection threshold, adaptive early termination, and a final
//! least-squares refit over the winning inlier set.
//!
//! The model is deliberately 4-DOF: a 2-point minimal sample determines a
//! similarity exactly, while a full 6-DOF affine would need 3 points.

mod error;
mod estimator;
mod params;
mod solve;
mod transform;

pub use error::EstimateError;
pub use estimator::{estimate_motion, MotionModel};
pub use params::EstimateParams;
pub use solve::fit_similarity;
pub use transform::SimilarityTransform;
