use nalgebra::{Matrix2x3, Point2};
use serde::{Deserialize, Serialize};

/// 4-DOF similarity transform: uniform scale, rotation and translation,
/// no independent shear.
///
/// Maps `(x, y) ↦ (a·x − b·y + tx, b·x + a·y + ty)`, i.e. the linear part
/// is `s·R(θ)` with `a = s·cos θ`, `b = s·sin θ`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityTransform {
    pub a: f64,
    pub b: f64,
    pub tx: f64,
    pub ty: f64,
}

impl SimilarityTransform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Build from explicit scale, rotation (radians) and translation.
    pub fn from_parts(scale: f64, angle: f64, tx: f64, ty: f64) -> Self {
        Self {
            a: scale * angle.cos(),
            b: scale * angle.sin(),
            tx,
            ty,
        }
    }

    /// The transform as a 2x3 affine coefficient matrix.
    pub fn matrix(&self) -> Matrix2x3<f64> {
        Matrix2x3::new(self.a, -self.b, self.tx, self.b, self.a, self.ty)
    }

    pub fn to_array(&self) -> [[f64; 3]; 2] {
        [[self.a, -self.b, self.tx], [self.b, self.a, self.ty]]
    }

    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let x = p.x as f64;
        let y = p.y as f64;
        Point2::new(
            (self.a * x - self.b * y + self.tx) as f32,
            (self.b * x + self.a * y + self.ty) as f32,
        )
    }

    pub fn scale(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Rotation angle in radians, in `(-π, π]`.
    pub fn rotation(&self) -> f64 {
        self.b.atan2(self.a)
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_points_in_place() {
        let t = SimilarityTransform::identity();
        let p = Point2::new(12.5f32, -3.0);
        assert_eq!(t.apply(p), p);
    }

    #[test]
    fn parts_round_trip() {
        let t = SimilarityTransform::from_parts(1.2, 0.3, 4.0, -7.5);
        assert_relative_eq!(t.scale(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(t.rotation(), 0.3, epsilon = 1e-12);
        assert_eq!(t.translation(), (4.0, -7.5));
    }

    #[test]
    fn matrix_matches_apply() {
        let t = SimilarityTransform::from_parts(0.9, -0.2, 1.0, 2.0);
        let m = t.matrix();
        let p = Point2::new(3.0f32, 5.0);
        let q = t.apply(p);
        let mx = m[(0, 0)] * 3.0 + m[(0, 1)] * 5.0 + m[(0, 2)];
        let my = m[(1, 0)] * 3.0 + m[(1, 1)] * 5.0 + m[(1, 2)];
        assert_relative_eq!(q.x as f64, mx, epsilon = 1e-5);
        assert_relative_eq!(q.y as f64, my, epsilon = 1e-5);
    }

    #[test]
    fn pure_rotation_preserves_norm() {
        let t = SimilarityTransform::from_parts(1.0, std::f64::consts::FRAC_PI_3, 0.0, 0.0);
        let p = Point2::new(3.0f32, 4.0);
        let q = t.apply(p);
        assert_relative_eq!(q.coords.norm(), 5.0, epsilon = 1e-4);
    }
}
