use rand::Rng;

use augmentor_image::{Image, ImageSize};
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::warp::warp_perspective;

use crate::error::TransformError;
use crate::geometry::Quad;
use crate::projective::solve_projective;

/// The direction family of a perspective skew.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkewKind {
    /// Tilt along a random axis: left, right, forward or backward.
    Tilt,
    /// Tilt left or right (x axis only).
    TiltLeftRight,
    /// Tilt forward or backward (y axis only).
    TiltTopBottom,
    /// Skew a single random corner along a random axis (8 directions).
    Corner,
}

/// Parameters for a perspective skew.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkewParams {
    /// The direction family to draw from.
    pub kind: SkewKind,
    /// Inverse intensity divisor. With magnitude `m > 0` the skew distance
    /// is `max(width, height) / m`, so larger magnitudes give smaller
    /// skews. When unset or zero the distance is drawn uniformly from
    /// `1..=max(width, height)`.
    pub magnitude: Option<f64>,
}

/// A corner displacement: corner index and unit offsets scaled by the
/// skew distance.
type CornerMove = (usize, f64, f64);

/// Tilt directions: left, right, forward, backward. Each stretches one
/// edge of the destination quad outwards by moving two corners.
const TILT_DIRECTIONS: [[CornerMove; 2]; 4] = [
    [
        (Quad::TOP_LEFT, 0.0, -1.0),
        (Quad::BOTTOM_LEFT, 0.0, 1.0),
    ],
    [
        (Quad::TOP_RIGHT, 0.0, -1.0),
        (Quad::BOTTOM_RIGHT, 0.0, 1.0),
    ],
    [(Quad::TOP_LEFT, -1.0, 0.0), (Quad::TOP_RIGHT, 1.0, 0.0)],
    [
        (Quad::BOTTOM_LEFT, -1.0, 0.0),
        (Quad::BOTTOM_RIGHT, 1.0, 0.0),
    ],
];

/// Corner skew directions: each corner moved outwards along one axis.
const CORNER_DIRECTIONS: [CornerMove; 8] = [
    (Quad::TOP_LEFT, -1.0, 0.0),
    (Quad::TOP_LEFT, 0.0, -1.0),
    (Quad::TOP_RIGHT, 1.0, 0.0),
    (Quad::TOP_RIGHT, 0.0, -1.0),
    (Quad::BOTTOM_RIGHT, 1.0, 0.0),
    (Quad::BOTTOM_RIGHT, 0.0, 1.0),
    (Quad::BOTTOM_LEFT, -1.0, 0.0),
    (Quad::BOTTOM_LEFT, 0.0, 1.0),
];

/// The skew distance in pixels for an image of the given size.
pub(crate) fn skew_distance<R: Rng + ?Sized>(
    size: ImageSize,
    magnitude: Option<f64>,
    rng: &mut R,
) -> Result<f64, TransformError> {
    let max_skew = size.width.max(size.height);
    match magnitude {
        Some(m) if m < 0.0 => Err(TransformError::InvalidParameter(format!(
            "skew magnitude must be non-negative, got {m}"
        ))),
        Some(m) if m > 0.0 => Ok(max_skew as f64 / m),
        // unset or zero magnitude draws the distance at random
        _ => Ok(rng.random_range(1..=max_skew) as f64),
    }
}

/// The destination quad for a skew of the given kind and distance.
pub(crate) fn perturbed_quad<R: Rng + ?Sized>(
    size: ImageSize,
    kind: SkewKind,
    distance: f64,
    rng: &mut R,
) -> Quad {
    let mut quad = Quad::from_size(size);

    match kind {
        SkewKind::Tilt | SkewKind::TiltLeftRight | SkewKind::TiltTopBottom => {
            let direction = match kind {
                SkewKind::Tilt => rng.random_range(0..4),
                SkewKind::TiltLeftRight => rng.random_range(0..2),
                SkewKind::TiltTopBottom => rng.random_range(2..4),
                SkewKind::Corner => unreachable!(),
            };
            for (corner, ux, uy) in TILT_DIRECTIONS[direction] {
                quad.displace(corner, ux * distance, uy * distance);
            }
        }
        SkewKind::Corner => {
            let (corner, ux, uy) = CORNER_DIRECTIONS[rng.random_range(0..8)];
            quad.displace(corner, ux * distance, uy * distance);
        }
    }

    quad
}

/// Skew an image in perspective and return a same-size result.
///
/// One or two corners of the image quad are displaced by the skew
/// distance, the projective coefficients for the perturbed quad are
/// solved, and the image is resampled at its own size (perspective fill,
/// no crop step).
pub fn skew<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    params: &SkewParams,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    let size = src.size();

    let distance = skew_distance(size, params.magnitude, rng)?;
    let dst_quad = perturbed_quad(size, params.kind, distance, rng);

    let coeffs = solve_projective(&Quad::from_size(size), &dst_quad)?;
    let coeffs_f32: [f32; 8] = core::array::from_fn(|i| coeffs[i] as f32);

    let mut dst = Image::from_size_val(size, 0.0)?;
    warp_perspective(src, &mut dst, &coeffs_f32, InterpolationMode::Bicubic)?;

    Ok(dst)
}
