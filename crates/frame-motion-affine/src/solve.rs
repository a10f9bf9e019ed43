use crate::transform::SimilarityTransform;
use nalgebra::{Point2, SMatrix, SVector};

/// Least-squares fit of a 4-DOF similarity over `(origin, destination)`
/// pairs via the 4x4 normal equations.
///
/// Each pair contributes two rows
/// `[x, -y, 1, 0] · [a b tx ty]ᵀ = u` and `[y, x, 0, 1] · [a b tx ty]ᵀ = v`;
/// with exactly two pairs the system is square and the fit is the
/// closed-form minimal solve. Returns `None` when the accumulated system
/// is singular (coincident or otherwise degenerate support).
pub fn fit_similarity(pairs: &[(Point2<f32>, Point2<f32>)]) -> Option<SimilarityTransform> {
    if pairs.len() < 2 {
        return None;
    }

    let mut ata = SMatrix::<f64, 4, 4>::zeros();
    let mut atb = SVector::<f64, 4>::zeros();

    for (src, dst) in pairs {
        let x = src.x as f64;
        let y = src.y as f64;
        let u = dst.x as f64;
        let v = dst.y as f64;

        // Row [x, -y, 1, 0] with rhs u.
        let r0 = [x, -y, 1.0, 0.0];
        // Row [y, x, 0, 1] with rhs v.
        let r1 = [y, x, 0.0, 1.0];

        for i in 0..4 {
            for j in 0..4 {
                ata[(i, j)] += r0[i] * r0[j] + r1[i] * r1[j];
            }
            atb[i] += r0[i] * u + r1[i] * v;
        }
    }

    let sol = ata.lu().solve(&atb)?;
    if !sol.iter().all(|v| v.is_finite()) {
        return None;
    }

    Some(SimilarityTransform {
        a: sol[0],
        b: sol[1],
        tx: sol[2],
        ty: sol[3],
    })
}
