use serde::{Deserialize, Serialize};

/// Configuration for `track_features`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackParams {
    /// Halved pyramid levels built on top of the base frame. Three extra
    /// levels let a 21x21 window absorb displacements of several window
    /// widths at the base resolution.
    pub pyramid_levels: usize,
    /// Window half-size; the tracked patch is `(2r+1)^2` pixels.
    pub window_radius: usize,
    /// Iteration budget per pyramid level.
    pub max_iterations: usize,
    /// Convergence bound on the per-iteration update step, in pixels of
    /// the current level.
    pub epsilon: f32,
    /// A normal-equations determinant below this marks the window as
    /// texture-deficient and the point as lost.
    pub min_determinant: f32,
    /// RMS brightness residual (intensity levels) above which a point is
    /// reported as lost even when the iteration converged.
    pub max_residual: f32,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            pyramid_levels: 3,
            window_radius: 10,
            max_iterations: 30,
            epsilon: 0.01,
            min_determinant: 1e-6,
            max_residual: 25.0,
        }
    }
}

impl TrackParams {
    /// Margin (pixels) a window needs from the frame edge: the patch
    /// half-size plus the gradient stencil and bilinear support.
    #[inline]
    pub fn window_margin(&self) -> f32 {
        (self.window_radius + 2) as f32
    }
}
