use crate::params::FeatureSelectParams;
use crate::response::corner_response;
use frame_motion_core::{FeaturePoint, GrayImageView};
use log::debug;
use nalgebra::Point2;

/// Choose a bounded set of trackable points in the reference frame.
///
/// Candidates are pixels whose corner response reaches
/// `quality_level * max_response`, taken in descending response order and
/// greedily thinned so accepted points stay at least `min_distance` apart.
/// The result is ordered by descending response.
///
/// An empty result is valid (a flat frame has no trackable structure) and
/// must be checked by the caller before tracking.
pub fn select_features(
    frame: &GrayImageView<'_>,
    params: &FeatureSelectParams,
) -> Vec<FeaturePoint> {
    let response = corner_response(frame, params.window_radius);
    let max_response = response.iter().cloned().fold(0.0f32, f32::max);
    if max_response <= 0.0 {
        return Vec::new();
    }

    let threshold = params.quality_level * max_response;
    let margin = params.border_margin;
    let w = frame.width;
    let h = frame.height;

    let mut candidates: Vec<(usize, usize, f32)> = Vec::new();
    if w > 2 * margin && h > 2 * margin {
        for y in margin..h - margin {
            for x in margin..w - margin {
                let v = response[y * w + x];
                if v >= threshold {
                    candidates.push((x, y, v));
                }
            }
        }
    }

    // Descending response; ties broken by scan order so selection is
    // deterministic across runs.
    candidates.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (a.1, a.0).cmp(&(b.1, b.0)))
    });

    let min_dist_sq = params.min_distance * params.min_distance;
    let mut accepted: Vec<FeaturePoint> = Vec::new();

    for &(x, y, strength) in &candidates {
        if accepted.len() >= params.max_count {
            break;
        }
        let p = Point2::new(x as f32, y as f32);
        let far_enough = accepted.iter().all(|f| {
            let d = p - f.position;
            d.norm_squared() >= min_dist_sq
        });
        if far_enough {
            accepted.push(FeaturePoint {
                position: p,
                strength,
            });
        }
    }

    debug!(
        "selected {} of {} candidate corners (threshold {:.3})",
        accepted.len(),
        candidates.len(),
        threshold
    );

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_motion_core::GrayImage;

    /// Checkerboard with 8-pixel squares: plenty of well-spread corners.
    fn checkerboard(size: usize) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                230
            } else {
                25
            }
        })
    }

    #[test]
    fn respects_max_count_bounds_and_spacing() {
        let img = checkerboard(128);
        let params = FeatureSelectParams {
            max_count: 20,
            min_distance: 9.0,
            ..FeatureSelectParams::default()
        };
        let pts = select_features(&img.as_view(), &params);

        assert!(!pts.is_empty());
        assert!(pts.len() <= 20);
        for p in &pts {
            assert!(p.position.x >= params.border_margin as f32);
            assert!(p.position.y >= params.border_margin as f32);
            assert!(p.position.x < (128 - params.border_margin) as f32);
            assert!(p.position.y < (128 - params.border_margin) as f32);
        }
        for (i, a) in pts.iter().enumerate() {
            for b in &pts[i + 1..] {
                let d = (a.position - b.position).norm();
                assert!(d >= 9.0, "points {a:?} and {b:?} are {d:.2} px apart");
            }
        }
    }

    #[test]
    fn ordered_by_descending_strength() {
        let img = checkerboard(96);
        let pts = select_features(&img.as_view(), &FeatureSelectParams::default());
        for pair in pts.windows(2) {
            assert!(pair[0].strength >= pair[1].strength);
        }
    }

    #[test]
    fn flat_frame_yields_no_features() {
        let img = GrayImage::from_fn(64, 64, |_, _| 77);
        let pts = select_features(&img.as_view(), &FeatureSelectParams::default());
        assert!(pts.is_empty());
    }

    #[test]
    fn strong_corner_near_border_is_excluded() {
        // One corner structure entirely inside the border margin band.
        let img = GrayImage::from_fn(64, 64, |x, y| {
            if x < 6 && y < 6 {
                255
            } else if (x / 8 + y / 8) % 2 == 0 {
                200
            } else {
                40
            }
        });
        let params = FeatureSelectParams {
            border_margin: 12,
            ..FeatureSelectParams::default()
        };
        let pts = select_features(&img.as_view(), &params);
        assert!(pts
            .iter()
            .all(|p| p.position.x >= 12.0 && p.position.y >= 12.0));
    }

    #[test]
    fn selection_is_deterministic() {
        let img = checkerboard(128);
        let params = FeatureSelectParams::default();
        let a = select_features(&img.as_view(), &params);
        let b = select_features(&img.as_view(), &params);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.position, y.position);
        }
    }
}
