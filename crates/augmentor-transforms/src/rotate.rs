use rand::Rng;

use augmentor_image::{Image, ImageSize};
use augmentor_imgproc::crop::crop_image;
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::resize::resize_native;
use augmentor_imgproc::rotate::{rotate180, rotate270, rotate90, rotate_expand};

use crate::error::TransformError;
use crate::geometry::Rect;

/// Parameters for a rotation by a fixed angle.
///
/// A positive angle rotates counter-clockwise. Exact multiples of 90
/// degrees are applied losslessly; any other angle must lie strictly
/// between -90 and 90 degrees and goes through the expand/crop/resize
/// path, so the result keeps the original size and aspect ratio with no
/// blank corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateParams {
    /// The rotation angle in degrees.
    pub degrees: f32,
}

/// Parameters for a rotation drawn per call from a left/right range.
///
/// The angle is drawn uniformly from `[-max_left, -5]` or `[5, max_right]`
/// degrees, with the side picked at random.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotateRangeParams {
    /// Maximum counter-clockwise rotation in degrees, at least 5 and at
    /// most 89.
    pub max_left: i32,
    /// Maximum clockwise rotation in degrees, at least 5 and at most 89.
    pub max_right: i32,
}

/// The largest axis-aligned crop of the original aspect ratio that lies
/// entirely within rotated content on the expanded canvas.
///
/// `canvas` is the size of the canvas after rotating with expansion. The
/// angle must lie strictly between -90 and 90 degrees; 0 yields the full
/// canvas.
pub(crate) fn largest_crop_window(angle: f32, canvas: ImageSize) -> Result<Rect, TransformError> {
    if !angle.is_finite() || angle.abs() >= 90.0 {
        return Err(TransformError::InvalidRotationAngle(angle));
    }
    if angle == 0.0 {
        return Ok(Rect::from_size(canvas));
    }

    let angle_a = (angle.abs() as f64).to_radians();
    let angle_b = (90.0f64).to_radians() - angle_a;

    // sin(a)/sin(b) = tan(a) for complementary angles
    let ratio = angle_a.sin() / angle_b.sin();

    let x_len = canvas.width as f64;
    let y_len = canvas.height as f64;

    let mut e = ratio * (y_len - x_len * ratio);
    e /= 1.0 - ratio * ratio;
    let b_len = x_len - e;
    let a_len = ratio * b_len;

    // extreme aspect ratios push the offsets past the canvas midline at
    // larger angles; keep them on the near side so the window stays valid
    let e = e.clamp(0.0, (x_len - 1.0) / 2.0);
    let a_len = a_len.clamp(0.0, (y_len - 1.0) / 2.0);

    let window = Rect {
        x0: e.round() as i64,
        y0: a_len.round() as i64,
        x1: (x_len - e).round() as i64,
        y1: (y_len - a_len).round() as i64,
    }
    .clamp_to(canvas);

    if window.is_empty() {
        return Err(TransformError::InvalidRotationAngle(angle));
    }

    Ok(window)
}

// Rotate with canvas expansion, crop the largest clean window, resize back.
fn rotate_fill_crop<const C: usize>(
    src: &Image<f32, C>,
    degrees: f32,
) -> Result<Image<f32, C>, TransformError> {
    let size = src.size();

    let expanded = rotate_expand(src, degrees, InterpolationMode::Bicubic)?;
    let window = largest_crop_window(degrees, expanded.size())?;

    let crop_size = ImageSize {
        width: window.width() as usize,
        height: window.height() as usize,
    };
    let mut cropped = Image::from_size_val(crop_size, 0.0)?;
    crop_image(&expanded, &mut cropped, window.x0 as usize, window.y0 as usize)?;

    let mut out = Image::from_size_val(size, 0.0)?;
    resize_native(&cropped, &mut out, InterpolationMode::Bicubic)?;

    Ok(out)
}

/// Rotate an image by a fixed angle.
///
/// Exact multiples of 90 degrees are lossless pixel shuffles (note that an
/// odd number of quarter turns swaps the output dimensions). All other
/// angles must lie strictly between -90 and 90 degrees and return an image
/// of the original size.
pub fn rotate<const C: usize>(
    src: &Image<f32, C>,
    params: &RotateParams,
) -> Result<Image<f32, C>, TransformError> {
    let degrees = params.degrees;
    if !degrees.is_finite() {
        return Err(TransformError::InvalidRotationAngle(degrees));
    }

    if degrees % 90.0 == 0.0 {
        let quarter_turns = ((degrees / 90.0) as i64).rem_euclid(4);
        return match quarter_turns {
            0 => Ok(src.clone()),
            1 => Ok(rotate90(src)?),
            2 => Ok(rotate180(src)?),
            3 => Ok(rotate270(src)?),
            _ => unreachable!(),
        };
    }

    if degrees.abs() >= 90.0 {
        return Err(TransformError::InvalidRotationAngle(degrees));
    }

    rotate_fill_crop(src, degrees)
}

/// Rotate an image by an angle drawn from the configured range.
pub fn rotate_range<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    params: &RotateRangeParams,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    for (name, value) in [("max_left", params.max_left), ("max_right", params.max_right)] {
        if !(5..=89).contains(&value) {
            return Err(TransformError::InvalidParameter(format!(
                "{name} must be between 5 and 89 degrees, got {value}"
            )));
        }
    }

    let random_left = -rng.random_range(5..=params.max_left);
    let random_right = rng.random_range(5..=params.max_right);

    let rotation = if rng.random_range(0..2) == 0 {
        random_left
    } else {
        random_right
    };

    rotate_fill_crop(src, rotation as f32)
}

/// Rotate an image by a random multiple of 90 degrees (one, two or three
/// quarter turns), losslessly.
pub fn rotate_random90<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    let quarter_turns = rng.random_range(1..=3);
    let rotated = match quarter_turns {
        1 => rotate90(src)?,
        2 => rotate180(src)?,
        _ => rotate270(src)?,
    };
    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use augmentor_image::{Image, ImageError, ImageSize};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::TransformError;
    use crate::geometry::Rect;

    use super::{RotateParams, RotateRangeParams};

    #[test]
    fn zero_angle_keeps_full_canvas() -> Result<(), TransformError> {
        let canvas = ImageSize {
            width: 223,
            height: 187,
        };
        let window = super::largest_crop_window(0.0, canvas)?;
        assert_eq!(window, Rect::from_size(canvas));
        Ok(())
    }

    #[test]
    fn right_angle_is_rejected_by_the_window_formula() {
        let canvas = ImageSize {
            width: 100,
            height: 100,
        };
        for angle in [90.0, -90.0, 135.0] {
            let res = super::largest_crop_window(angle, canvas);
            assert!(matches!(
                res,
                Err(TransformError::InvalidRotationAngle(_))
            ));
        }
    }

    #[test]
    fn crop_window_for_30_degrees() -> Result<(), TransformError> {
        // 200x100 rotated by 30 degrees expands to a 223x187 canvas
        let canvas = ImageSize {
            width: 223,
            height: 187,
        };
        let window = super::largest_crop_window(30.0, canvas)?;

        let (x_len, y_len) = (canvas.width as f64, canvas.height as f64);
        assert!(window.x0 >= 0 && (window.x0 as f64) < x_len / 2.0);
        assert!(window.y0 >= 0 && (window.y0 as f64) < y_len / 2.0);
        assert_eq!(window.x1, canvas.width as i64 - window.x0);
        assert_eq!(window.y1, canvas.height as i64 - window.y0);
        assert!(!window.is_empty());

        Ok(())
    }

    #[test]
    fn crop_window_small_angle_square() -> Result<(), TransformError> {
        // 100x100 rotated by 10 degrees expands to a 116x116 canvas
        let canvas = ImageSize {
            width: 116,
            height: 116,
        };
        let window = super::largest_crop_window(10.0, canvas)?;

        // E = A by symmetry and the window is comfortably interior
        assert_eq!(window.x0, window.y0);
        assert_eq!(window.x0, 17);
        assert_eq!(window.x1, 99);
        assert_eq!(window.y1, 99);

        Ok(())
    }

    #[test]
    fn crop_window_is_symmetric_in_sign() -> Result<(), TransformError> {
        let canvas = ImageSize {
            width: 223,
            height: 187,
        };
        let window_pos = super::largest_crop_window(30.0, canvas)?;
        let window_neg = super::largest_crop_window(-30.0, canvas)?;
        assert_eq!(window_pos, window_neg);
        Ok(())
    }

    #[test]
    fn rotate_zero_is_identity() -> Result<(), TransformError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let out = super::rotate(&image, &RotateParams { degrees: 0.0 })?;
        assert_eq!(out.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn rotate_right_angles_are_lossless() -> Result<(), TransformError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0f32, 1.0, 2.0, 3.0],
        )?;

        let quarter = super::rotate(&image, &RotateParams { degrees: 90.0 })?;
        assert_eq!(quarter.as_slice(), &[1.0, 3.0, 0.0, 2.0]);

        let half = super::rotate(&image, &RotateParams { degrees: 180.0 })?;
        assert_eq!(half.as_slice(), &[3.0, 2.0, 1.0, 0.0]);

        let minus_quarter = super::rotate(&image, &RotateParams { degrees: -90.0 })?;
        assert_eq!(minus_quarter.as_slice(), &[2.0, 0.0, 3.0, 1.0]);

        let full = super::rotate(&image, &RotateParams { degrees: 360.0 })?;
        assert_eq!(full.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn rotate_30_degrees_keeps_original_size() -> Result<(), TransformError> {
        let size = ImageSize {
            width: 200,
            height: 100,
        };
        let image = Image::<f32, 3>::from_size_val(size, 1.0)?;

        let out = super::rotate(&image, &RotateParams { degrees: 30.0 })?;
        assert_eq!(out.size(), size);

        // the crop keeps only rotated content, so no fill pixels survive
        let min = out
            .as_slice()
            .iter()
            .fold(f32::INFINITY, |acc, &v| acc.min(v));
        assert!(min > 0.5);

        Ok(())
    }

    #[test]
    fn rotate_out_of_range_angle_errors() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            0.0,
        )?;

        let res = super::rotate(&image, &RotateParams { degrees: 120.0 });
        assert!(matches!(
            res,
            Err(TransformError::InvalidRotationAngle(_))
        ));

        Ok(())
    }

    #[test]
    fn rotate_range_draws_within_bounds() -> Result<(), TransformError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 50,
                height: 50,
            },
            1.0,
        )?;

        let params = RotateRangeParams {
            max_left: 10,
            max_right: 10,
        };

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5 {
            let out = super::rotate_range(&image, &params, &mut rng)?;
            assert_eq!(out.size(), image.size());
        }

        Ok(())
    }

    #[test]
    fn rotate_range_validates_bounds() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            0.0,
        )?;

        let mut rng = StdRng::seed_from_u64(12);
        for params in [
            RotateRangeParams {
                max_left: 4,
                max_right: 10,
            },
            RotateRangeParams {
                max_left: 10,
                max_right: 95,
            },
        ] {
            let res = super::rotate_range(&image, &params, &mut rng);
            assert!(matches!(res, Err(TransformError::InvalidParameter(_))));
        }

        Ok(())
    }

    #[test]
    fn rotate_random90_swaps_or_keeps_dimensions() -> Result<(), TransformError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 30,
                height: 20,
            },
            0.0,
        )?;

        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..10 {
            let out = super::rotate_random90(&image, &mut rng)?;
            let size = out.size();
            let kept = size == image.size();
            let swapped = size.width == image.size().height && size.height == image.size().width;
            assert!(kept || swapped);
        }

        Ok(())
    }
}
