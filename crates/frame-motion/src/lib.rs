//! Sparse inter-frame motion estimation.
//!
//! Given two decoded grayscale frames, the pipeline selects trackable
//! corners in the reference frame, follows each one into the target frame
//! with a coarse-to-fine tracker, drops the points that were lost, and
//! robustly fits a 4-DOF similarity transform (uniform scale + rotation +
//! translation) to the survivors by seeded randomized-sampling consensus.
//!
//! ## Quickstart
//!
//! ```no_run
//! use frame_motion::{estimate_frame_motion, MotionPipelineParams};
//! use frame_motion::interop::gray_view;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = ImageReader::open("frame_0000.png")?.decode()?.to_luma8();
//! let b = ImageReader::open("frame_0001.png")?.decode()?.to_luma8();
//!
//! let params = MotionPipelineParams::default();
//! let estimate = estimate_frame_motion(&gray_view(&a), &gray_view(&b), &params)?;
//! println!("affine matrix: {:?}", estimate.model.transform.to_array());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `frame_motion::core`: frame views, bilinear sampling, pyramids and
//!   the feature/correspondence vocabulary.
//! - `frame_motion::features`: corner-response feature selection.
//! - `frame_motion::flow`: pyramidal tracking + correspondence filtering.
//! - `frame_motion::affine`: robust similarity estimation.
//! - `frame_motion::draw`: motion-vector overlay rendering.
//! - `frame_motion::interop` (feature `image`): adapters for `image`
//!   buffers.
//!
//! The pipeline owns no I/O: where the frames come from (files, an
//! extracted video directory, an interactive picker) is the caller's
//! business.

pub use frame_motion_affine as affine;
pub use frame_motion_core as core;
pub use frame_motion_draw as draw;
pub use frame_motion_features as features;
pub use frame_motion_flow as flow;

pub use frame_motion_affine::{EstimateError, EstimateParams, MotionModel, SimilarityTransform};
pub use frame_motion_core::{Correspondence, FeaturePoint, GrayImage, GrayImageView};
pub use frame_motion_draw::{draw_motion_overlay, RgbOverlay};
pub use frame_motion_features::FeatureSelectParams;
pub use frame_motion_flow::TrackParams;

mod error;
mod params;
mod pipeline;

pub use error::PipelineError;
pub use params::MotionPipelineParams;
pub use pipeline::{estimate_frame_motion, MotionEstimate};

#[cfg(feature = "image")]
pub mod interop;
