use frame_motion_core::{Correspondence, GrayImageView};
use nalgebra::Point2;

/// Owned RGB8 image, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbOverlay {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbOverlay {
    /// Expand a grayscale frame into an RGB copy.
    pub fn from_gray(src: &GrayImageView<'_>) -> Self {
        let mut data = Vec::with_capacity(src.width * src.height * 3);
        for &v in src.data {
            data.extend_from_slice(&[v, v, v]);
        }
        Self {
            width: src.width,
            height: src.height,
            data,
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = 3 * (y as usize * self.width + x as usize);
        self.data[idx..idx + 3].copy_from_slice(&color);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = 3 * (y * self.width + x);
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

const ARROW_COLOR: [u8; 3] = [0, 255, 0];
/// Arrow-head strokes span this fraction of the shaft length.
const TIP_FRACTION: f32 = 0.3;

/// Render inlier correspondences as directed arrows on an RGB copy of the
/// reference frame.
///
/// Pure function over already-computed data; it plays no algorithmic role
/// in estimation. A length mismatch between `correspondences` and
/// `inliers` is a caller bug and panics.
pub fn draw_motion_overlay(
    reference: &GrayImageView<'_>,
    correspondences: &[Correspondence],
    inliers: &[bool],
) -> RgbOverlay {
    assert_eq!(
        correspondences.len(),
        inliers.len(),
        "inlier mask must align with the correspondence list"
    );

    let mut overlay = RgbOverlay::from_gray(reference);
    for (c, &inl) in correspondences.iter().zip(inliers) {
        if inl {
            draw_arrow(&mut overlay, c.origin.position, c.destination);
        }
    }
    overlay
}

fn draw_arrow(overlay: &mut RgbOverlay, from: Point2<f32>, to: Point2<f32>) {
    draw_segment(overlay, from, to);

    let shaft = to - from;
    let len = shaft.norm();
    if len < 1.0 {
        return;
    }

    let tip = TIP_FRACTION * len;
    let angle = (from.y - to.y).atan2(from.x - to.x);
    for side in [-1.0f32, 1.0] {
        let a = angle + side * std::f32::consts::FRAC_PI_4;
        let barb = Point2::new(to.x + tip * a.cos(), to.y + tip * a.sin());
        draw_segment(overlay, to, barb);
    }
}

/// Line rasterization by uniform stepping at sub-pixel pitch; endpoints
/// round to the nearest pixel.
fn draw_segment(overlay: &mut RgbOverlay, from: Point2<f32>, to: Point2<f32>) {
    let d = to - from;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let x = from.x + t * d.x;
        let y = from.y + t * d.y;
        overlay.set_pixel(x.round() as i32, y.round() as i32, ARROW_COLOR);
    }
}
