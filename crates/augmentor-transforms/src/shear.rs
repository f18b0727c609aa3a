use rand::Rng;

use augmentor_image::{Image, ImageSize};
use augmentor_imgproc::crop::crop_image;
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::resize::resize_native;
use augmentor_imgproc::warp::warp_affine;

use crate::error::TransformError;

/// The axis along which a shear is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShearAxis {
    /// Shear along the x axis (rows slide horizontally).
    X,
    /// Shear along the y axis (columns slide vertically).
    Y,
}

/// Parameters for an affine shear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShearParams {
    /// Maximum shear angle to the left in degrees, in `[0, 90)`.
    pub max_shear_left: f32,
    /// Maximum shear angle to the right in degrees, in `[0, 90)`.
    pub max_shear_right: f32,
    /// The axis to shear along; drawn at random per call when `None`.
    pub axis: Option<ShearAxis>,
}

/// The derived geometry of one shear application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShearGeometry {
    /// Affine coefficients mapping expanded-canvas pixels to source pixels.
    pub matrix: [f32; 6],
    /// Size of the expanded canvas the warp is applied at.
    pub canvas: ImageSize,
    /// Top-left corner of the blank-wedge crop inside the canvas.
    pub crop_offset: (usize, usize),
    /// Size of the blank-wedge crop.
    pub crop_size: ImageSize,
}

/// Compute the shear matrix, expanded canvas and wedge crop for an angle.
///
/// The pixel shift is `ceil(tan(angle) * extent)` for positive angles and
/// `floor(...)` for negative ones; the matrix offset is only applied for
/// positive angles, which mirrors the canvas anchoring between the two
/// shear directions.
pub(crate) fn shear_geometry(
    size: ImageSize,
    angle: f32,
    axis: ShearAxis,
) -> Result<ShearGeometry, TransformError> {
    let (width, height) = (size.width, size.height);
    let slope = angle.to_radians().tan();

    // transverse extent that the shear slides across
    let extent = match axis {
        ShearAxis::X => height,
        ShearAxis::Y => width,
    };

    let shift = slope * extent as f32;
    let shift = if shift > 0.0 { shift.ceil() } else { shift.floor() };

    let mut offset = shift;
    let mut phi = slope;
    if angle <= 0.0 {
        offset = 0.0;
        phi = -slope.abs();
    }

    let abs_shift = shift.abs() as usize;

    let (matrix, canvas, crop_offset, crop_size) = match axis {
        ShearAxis::X => (
            [1.0, phi, -offset, 0.0, 1.0, 0.0],
            ImageSize {
                width: width + abs_shift,
                height,
            },
            (abs_shift, 0),
            ImageSize {
                width: width.saturating_sub(abs_shift),
                height,
            },
        ),
        ShearAxis::Y => (
            [1.0, 0.0, 0.0, phi, 1.0, -offset],
            ImageSize {
                width,
                height: height + abs_shift,
            },
            (0, abs_shift),
            ImageSize {
                width,
                height: height.saturating_sub(abs_shift),
            },
        ),
    };

    if crop_size.area() == 0 {
        return Err(TransformError::InvalidDimensions(
            crop_size.width,
            crop_size.height,
        ));
    }

    Ok(ShearGeometry {
        matrix,
        canvas,
        crop_offset,
        crop_size,
    })
}

/// Shear an image along a random or forced axis and return a same-size
/// result.
///
/// The angle is drawn uniformly from `[-max_shear_left, max_shear_right]`
/// degrees. The image is warped on an expanded canvas, the parallelogram
/// wedge of blank pixels is cropped away, and the remainder is resized
/// back to the original size.
pub fn shear<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    params: &ShearParams,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    for (name, value) in [
        ("max_shear_left", params.max_shear_left),
        ("max_shear_right", params.max_shear_right),
    ] {
        if !(0.0..90.0).contains(&value) {
            return Err(TransformError::InvalidParameter(format!(
                "{name} must be in [0, 90) degrees, got {value}"
            )));
        }
    }

    let angle = rng.random_range(-params.max_shear_left..=params.max_shear_right);
    let axis = params.axis.unwrap_or_else(|| {
        if rng.random_range(0..2) == 0 {
            ShearAxis::X
        } else {
            ShearAxis::Y
        }
    });

    let size = src.size();
    let geometry = shear_geometry(size, angle, axis)?;

    let mut warped = Image::from_size_val(geometry.canvas, 0.0)?;
    warp_affine(src, &mut warped, &geometry.matrix, InterpolationMode::Bicubic)?;

    let mut cropped = Image::from_size_val(geometry.crop_size, 0.0)?;
    crop_image(
        &warped,
        &mut cropped,
        geometry.crop_offset.0,
        geometry.crop_offset.1,
    )?;

    let mut out = Image::from_size_val(size, 0.0)?;
    resize_native(&cropped, &mut out, InterpolationMode::Bicubic)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use augmentor_image::{Image, ImageSize};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::TransformError;

    use super::{ShearAxis, ShearParams};

    const SIZE: ImageSize = ImageSize {
        width: 80,
        height: 60,
    };

    #[test]
    fn positive_x_shear_geometry() -> Result<(), TransformError> {
        let geometry = super::shear_geometry(SIZE, 10.0, ShearAxis::X)?;

        // tan(10 deg) * 60 = 10.58, ceiled to 11
        assert_eq!(geometry.canvas.width, 91);
        assert_eq!(geometry.canvas.height, 60);
        assert_eq!(geometry.crop_offset, (11, 0));
        assert_eq!(geometry.crop_size.width, 69);

        assert_relative_eq!(geometry.matrix[1], 10.0f32.to_radians().tan());
        assert_relative_eq!(geometry.matrix[2], -11.0);

        Ok(())
    }

    #[test]
    fn negative_x_shear_mirrors_offset() -> Result<(), TransformError> {
        let positive = super::shear_geometry(SIZE, 10.0, ShearAxis::X)?;
        let negative = super::shear_geometry(SIZE, -10.0, ShearAxis::X)?;

        // same canvas and crop, mirrored matrix anchoring
        assert_eq!(negative.canvas, positive.canvas);
        assert_eq!(negative.crop_offset, positive.crop_offset);
        assert_eq!(negative.crop_size, positive.crop_size);

        assert_relative_eq!(negative.matrix[1], -positive.matrix[1]);
        assert_relative_eq!(negative.matrix[2], 0.0);
        assert!(positive.matrix[2] < 0.0);

        Ok(())
    }

    #[test]
    fn y_shear_transposes_the_geometry() -> Result<(), TransformError> {
        let x_geometry = super::shear_geometry(SIZE, 10.0, ShearAxis::X)?;
        let y_geometry = super::shear_geometry(
            ImageSize {
                width: SIZE.height,
                height: SIZE.width,
            },
            10.0,
            ShearAxis::Y,
        )?;

        assert_eq!(y_geometry.canvas.height, x_geometry.canvas.width);
        assert_eq!(y_geometry.canvas.width, x_geometry.canvas.height);
        assert_eq!(y_geometry.crop_offset.1, x_geometry.crop_offset.0);
        assert_relative_eq!(y_geometry.matrix[3], x_geometry.matrix[1]);
        assert_relative_eq!(y_geometry.matrix[5], x_geometry.matrix[2]);

        Ok(())
    }

    #[test]
    fn zero_angle_is_identity_geometry() -> Result<(), TransformError> {
        let geometry = super::shear_geometry(SIZE, 0.0, ShearAxis::X)?;
        assert_eq!(geometry.canvas, SIZE);
        assert_eq!(geometry.crop_offset, (0, 0));
        assert_eq!(geometry.crop_size, SIZE);
        assert_eq!(geometry.matrix, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        Ok(())
    }

    #[test]
    fn extreme_angle_with_tiny_width_errors() {
        let size = ImageSize {
            width: 4,
            height: 100,
        };
        // tan(80 deg) * 100 far exceeds the width, nothing would remain
        let res = super::shear_geometry(size, 80.0, ShearAxis::X);
        assert!(matches!(res, Err(TransformError::InvalidDimensions(_, _))));
    }

    #[test]
    fn shear_output_keeps_size() -> Result<(), TransformError> {
        let src = Image::<f32, 3>::from_size_val(SIZE, 0.5)?;
        let params = ShearParams {
            max_shear_left: 15.0,
            max_shear_right: 15.0,
            axis: None,
        };

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..5 {
            let out = super::shear(&src, &params, &mut rng)?;
            assert_eq!(out.size(), SIZE);
        }

        Ok(())
    }

    #[test]
    fn shear_validates_bounds() {
        let src = Image::<f32, 1>::from_size_val(SIZE, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(22);

        let params = ShearParams {
            max_shear_left: 95.0,
            max_shear_right: 10.0,
            axis: Some(ShearAxis::X),
        };
        let res = super::shear(&src, &params, &mut rng);
        assert!(matches!(res, Err(TransformError::InvalidParameter(_))));
    }
}
