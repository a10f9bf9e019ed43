use crate::image::{GrayImage, GrayImageView};

/// Coarse-to-fine image pyramid built by repeated 2x downsampling.
///
/// Level 0 is the full-resolution base frame; level `k` is the base halved
/// `k` times. A position `p` at the base maps to `p / 2^k` at level `k`.
#[derive(Clone, Debug)]
pub struct ImagePyramid {
    levels: Vec<GrayImage>,
}

/// Smallest side length a level may have. Halving stops early once the
/// next level would drop below this, so tiny frames still produce a
/// usable (if shallow) pyramid.
const MIN_LEVEL_SIDE: usize = 8;

impl ImagePyramid {
    /// Build a pyramid with up to `extra_levels` halved levels on top of
    /// the base frame.
    pub fn build(base: &GrayImageView<'_>, extra_levels: usize) -> Self {
        let mut levels = Vec::with_capacity(extra_levels + 1);
        levels.push(GrayImage {
            width: base.width,
            height: base.height,
            data: base.data.to_vec(),
        });

        for _ in 0..extra_levels {
            let prev = levels.last().expect("pyramid has a base level");
            if prev.width / 2 < MIN_LEVEL_SIDE || prev.height / 2 < MIN_LEVEL_SIDE {
                break;
            }
            levels.push(halve(&prev.as_view()));
        }

        Self { levels }
    }

    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// View of pyramid level `k` (0 = base). Panics when out of range.
    #[inline]
    pub fn level(&self, k: usize) -> GrayImageView<'_> {
        self.levels[k].as_view()
    }

    /// Scale factor mapping base-frame coordinates down to level `k`.
    #[inline]
    pub fn scale_at(&self, k: usize) -> f32 {
        1.0 / (1u32 << k) as f32
    }
}

/// Half-resolution copy: each output pixel is the mean of a 2x2 block.
fn halve(src: &GrayImageView<'_>) -> GrayImage {
    let w = src.width / 2;
    let h = src.height / 2;
    let mut out = GrayImage::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let sx = (2 * x) as i32;
            let sy = (2 * y) as i32;
            let sum = src.get(sx, sy) as u16
                + src.get(sx + 1, sy) as u16
                + src.get(sx, sy + 1) as u16
                + src.get(sx + 1, sy + 1) as u16;
            out.data[y * w + x] = ((sum + 2) / 4) as u8;
        }
    }

    out
}
