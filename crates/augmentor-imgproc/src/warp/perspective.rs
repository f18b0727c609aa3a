use augmentor_image::{Image, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Applies a projective transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 8]) -> (f32, f32) {
    let w = m[6] * x + m[7] * y + 1.0;
    let u = (m[0] * x + m[1] * y + m[2]) / w;
    let v = (m[3] * x + m[4] * y + m[5]) / w;
    (u, v)
}

/// Applies a perspective transformation to an image.
///
/// The eight coefficients `(a, b, c, d, e, f, g, h)` map destination pixel
/// coordinates to source pixel coordinates:
///
/// `x_src = (a x + b y + c) / (g x + h y + 1)`
/// `y_src = (d x + e y + f) / (g x + h y + 1)`
///
/// Destination pixels that map outside the source are left untouched.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 8 perspective coefficients mapping dst -> src.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::interpolation::InterpolationMode;
/// use augmentor_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0.0f32; 4 * 5],
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
///
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(dst.size().width, 4);
/// assert_eq!(dst.size().height, 5);
/// ```
pub fn warp_perspective<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &[f32; 8],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    // create meshgrid to find corresponding positions in src from dst
    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        transform_point(x as f32, y as f32, m)
    });

    // apply the perspective transformation
    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        if x >= 0.0f32 && x < src.cols() as f32 && y >= 0.0f32 && y < src.rows() as f32 {
            dst_pixel
                .iter_mut()
                .enumerate()
                .for_each(|(k, pixel)| *pixel = interpolate_pixel(src, x, y, k, interpolation));
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use augmentor_image::{Image, ImageError, ImageSize};

    #[test]
    fn transform_point_identity_coeffs() {
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        assert_eq!(super::transform_point(2.0, 3.0, &m), (2.0, 3.0));
    }

    #[test]
    fn transform_point_projective_divisor() {
        // halve coordinates through the projective divisor at (2, 0)
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.0];
        let (x, y) = super::transform_point(2.0, 4.0, &m);
        assert_eq!((x, y), (1.0, 2.0));
    }

    #[test]
    fn warp_perspective_identity() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];

        let mut image_transformed = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            super::InterpolationMode::Nearest,
        )?;

        assert_eq!(image_transformed.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn warp_perspective_hflip() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let image_expected = [1.0, 0.0, 3.0, 2.0, 5.0, 4.0];

        // mirror around the vertical center line
        let m = [-1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0];

        let mut image_transformed = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            super::InterpolationMode::Nearest,
        )?;

        assert_eq!(image_transformed.as_slice(), image_expected);

        Ok(())
    }
}
