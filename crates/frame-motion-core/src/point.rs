use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A trackable point selected in the reference frame.
///
/// Positions are sub-pixel, in the reference frame's coordinate space.
/// Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub position: Point2<f32>,
    /// Corner response that ranked this point during selection.
    pub strength: f32,
}

/// Where a selected feature ended up in the target frame.
///
/// Written once by the tracker and never mutated afterwards. A failed
/// track keeps its last position estimate but is flagged `tracked = false`
/// and is dropped by the correspondence filter before estimation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub origin: FeaturePoint,
    pub destination: Point2<f32>,
    pub tracked: bool,
    /// RMS brightness difference over the tracking window at the final
    /// position, usable downstream for quality-based filtering.
    pub residual: f32,
}

impl Correspondence {
    /// Displacement vector from origin to destination.
    #[inline]
    pub fn displacement(&self) -> nalgebra::Vector2<f32> {
        self.destination - self.origin.position
    }
}
