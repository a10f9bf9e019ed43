//! Motion-vector overlay rendering.
//!
//! Kept architecturally separate from estimation: a pure renderer over an
//! already-computed correspondence list and inlier mask.

mod overlay;

pub use overlay::{draw_motion_overlay, RgbOverlay};
