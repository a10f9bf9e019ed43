use serde::{Deserialize, Serialize};

/// Configuration for `estimate_motion`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimateParams {
    /// Reprojection distance (pixels) under which a correspondence counts
    /// as an inlier of a candidate transform.
    pub inlier_threshold: f64,
    /// Upper bound on consensus iterations; adaptive early termination
    /// usually stops well before it.
    pub max_iterations: usize,
    /// Probability that at least one sampled pair is outlier-free, used to
    /// shrink the iteration bound as the observed inlier ratio improves.
    pub confidence: f64,
    /// Minimal inlier support a model needs to be accepted.
    pub min_inliers: usize,
    /// Seed for the deterministic sampling sequence. Two runs with the
    /// same correspondences and seed produce identical models.
    pub seed: u64,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            inlier_threshold: 3.0,
            max_iterations: 2000,
            confidence: 0.99,
            min_inliers: 3,
            seed: 0,
        }
    }
}
