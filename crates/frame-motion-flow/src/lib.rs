//! Sparse coarse-to-fine feature tracking between two grayscale frames.
//!
//! Each selected point is located in the target frame by iterative
//! least-squares refinement of the brightness-constancy residual over an
//! image pyramid. Tracking failures are per-point, surfaced as
//! `tracked = false` on the returned correspondences and dropped by
//! `retain_tracked` before motion estimation.

mod filter;
mod params;
mod tracker;

pub use filter::{retain_tracked, tracked_count};
pub use params::TrackParams;
pub use tracker::track_features;
