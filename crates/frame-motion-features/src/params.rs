use serde::{Deserialize, Serialize};

/// Configuration for `select_features`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureSelectParams {
    /// Upper bound on the number of returned points.
    pub max_count: usize,
    /// Fraction of the global maximum corner response a pixel must reach
    /// to become a candidate. 0.01 keeps everything within two orders of
    /// magnitude of the strongest corner.
    pub quality_level: f32,
    /// Minimal pairwise distance (pixels) between accepted points.
    pub min_distance: f32,
    /// Half-size of the gradient-covariance window. Radius 1 integrates a
    /// 3x3 neighbourhood.
    pub window_radius: usize,
    /// Pixels closer than this to any frame edge are never candidates.
    ///
    /// The default leaves room for the tracker's default 21x21 window plus
    /// its gradient and bilinear support, so every selected point can be
    /// tracked without touching the frame boundary.
    pub border_margin: usize,
}

impl Default for FeatureSelectParams {
    fn default() -> Self {
        Self {
            max_count: 500,
            quality_level: 0.01,
            min_distance: 10.0,
            window_radius: 1,
            border_margin: 12,
        }
    }
}
