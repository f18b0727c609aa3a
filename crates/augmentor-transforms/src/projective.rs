use faer::prelude::SpSolver;

use crate::error::TransformError;
use crate::geometry::Quad;

/// Reciprocal condition number below which the normal equations are
/// considered degenerate. Coordinates are normalized before solving, so
/// this threshold is independent of the image scale.
const RCOND_THRESHOLD: f64 = 1e-10;

/// Solve for the 8 projective coefficients mapping `dst` onto `src`.
///
/// Each corner pair contributes two linearized equations of the mapping
/// `x_src = (a x + b y + c) / (g x + h y + 1)`, giving an 8x8 system that
/// is solved through its normal equations `(AᵀA) k = Aᵀb`. The returned
/// coefficients transform destination pixel coordinates into source pixel
/// coordinates, ready for a perspective resampler.
///
/// Corner correspondence is by index, so both quads must keep the
/// {top-left, top-right, bottom-right, bottom-left} order.
///
/// # Errors
///
/// Returns [`TransformError::SingularTransform`] when the correspondences
/// are degenerate (for example three near-collinear corners) and the
/// system is too ill-conditioned to invert.
///
/// # Example
///
/// ```
/// use augmentor_image::ImageSize;
/// use augmentor_transforms::geometry::Quad;
/// use augmentor_transforms::projective::solve_projective;
///
/// let quad = Quad::from_size(ImageSize { width: 10, height: 10 });
/// let coeffs = solve_projective(&quad, &quad).unwrap();
///
/// // the identity mapping
/// assert!((coeffs[0] - 1.0).abs() < 1e-6);
/// assert!(coeffs[1].abs() < 1e-6);
/// ```
pub fn solve_projective(src: &Quad, dst: &Quad) -> Result<[f64; 8], TransformError> {
    // normalize coordinates so conditioning does not depend on image size
    let scale = src
        .points
        .iter()
        .chain(dst.points.iter())
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(0.0f64, f64::max);
    let scale = if scale > 0.0 { scale } else { 1.0 };

    let mut mat_a = faer::Mat::<f64>::zeros(8, 8);
    let mut vec_b = faer::Mat::<f64>::zeros(8, 1);

    for i in 0..4 {
        let d = dst.points[i];
        let s = src.points[i];
        let (dx, dy) = (d.x / scale, d.y / scale);
        let (sx, sy) = (s.x / scale, s.y / scale);

        mat_a.write(2 * i, 0, dx);
        mat_a.write(2 * i, 1, dy);
        mat_a.write(2 * i, 2, 1.0);
        mat_a.write(2 * i, 6, -sx * dx);
        mat_a.write(2 * i, 7, -sx * dy);

        mat_a.write(2 * i + 1, 3, dx);
        mat_a.write(2 * i + 1, 4, dy);
        mat_a.write(2 * i + 1, 5, 1.0);
        mat_a.write(2 * i + 1, 6, -sy * dx);
        mat_a.write(2 * i + 1, 7, -sy * dy);

        vec_b.write(2 * i, 0, sx);
        vec_b.write(2 * i + 1, 0, sy);
    }

    // normal equations
    let at = mat_a.transpose().to_owned();
    let ata = &at * &mat_a;
    let atb = &at * &vec_b;

    // reject ill-conditioned systems before accepting a solution
    let svd = ata.svd();
    let s_diag = svd.s_diagonal();
    let (s_max, s_min) = (s_diag.read(0), s_diag.read(7));
    let rcond = if s_max > 0.0 { s_min / s_max } else { 0.0 };
    if !rcond.is_finite() || rcond < RCOND_THRESHOLD {
        return Err(TransformError::SingularTransform(rcond));
    }

    let k = ata.partial_piv_lu().solve(&atb);

    // undo the coordinate normalization
    let mut coeffs = [0.0f64; 8];
    for (i, c) in coeffs.iter_mut().enumerate() {
        *c = k.read(i, 0);
    }
    coeffs[2] *= scale;
    coeffs[5] *= scale;
    coeffs[6] /= scale;
    coeffs[7] /= scale;

    Ok(coeffs)
}

/// Apply the projective coefficients to a destination point.
pub(crate) fn project_point(x: f64, y: f64, coeffs: &[f64; 8]) -> (f64, f64) {
    let w = coeffs[6] * x + coeffs[7] * y + 1.0;
    (
        (coeffs[0] * x + coeffs[1] * y + coeffs[2]) / w,
        (coeffs[3] * x + coeffs[4] * y + coeffs[5]) / w,
    )
}
