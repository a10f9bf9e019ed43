//! Interop with the `image` crate.
//!
//! The core pipeline only speaks `GrayImageView`; these helpers adapt
//! decoded `image` buffers in and rendered overlays out. Frame decoding
//! and file enumeration stay entirely on the caller's side.

use crate::error::PipelineError;
use crate::params::MotionPipelineParams;
use crate::pipeline::{estimate_frame_motion, MotionEstimate};
use frame_motion_core::GrayImageView;
use frame_motion_draw::RgbOverlay;

/// Borrow an `image::GrayImage` as the core view type.
pub fn gray_view(img: &image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::GrayImage` from a raw grayscale buffer, validating
/// its length against the dimensions.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<image::GrayImage, PipelineError> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(PipelineError::InvalidFrameBuffer {
            expected,
            got: pixels.len(),
        });
    }
    image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(PipelineError::InvalidFrameBuffer {
            expected,
            got: pixels.len(),
        })
}

/// Run the full pipeline on two decoded `image` frames.
pub fn estimate_frame_motion_image(
    reference: &image::GrayImage,
    target: &image::GrayImage,
    params: &MotionPipelineParams,
) -> Result<MotionEstimate, PipelineError> {
    estimate_frame_motion(&gray_view(reference), &gray_view(target), params)
}

/// Convert a rendered overlay into an `image::RgbImage`.
pub fn overlay_to_image(overlay: &RgbOverlay) -> image::RgbImage {
    image::RgbImage::from_raw(
        overlay.width as u32,
        overlay.height as u32,
        overlay.data.clone(),
    )
    .expect("overlay buffer length matches its dimensions")
}
