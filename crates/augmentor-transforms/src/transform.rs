use rand::Rng;

use augmentor_image::Image;
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::resize::resize_native;

use crate::distort::{self, DistortParams};
use crate::error::TransformError;
use crate::rotate::{self, RotateParams, RotateRangeParams};
use crate::shear::{self, ShearParams};
use crate::skew::{self, SkewParams};
use crate::zoom::{self, ZoomParams};

/// A geometric augmentation transform with its parameters.
///
/// The parameters are immutable per-invocation configuration; randomized
/// transforms draw fresh values from the RNG handle on every application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Perspective skew of one or two image corners.
    Skew(SkewParams),
    /// Rotation by a fixed angle with fill-crop (lossless for multiples of
    /// 90 degrees).
    Rotate(RotateParams),
    /// Rotation by an angle drawn from a left/right range, with fill-crop.
    RotateRange(RotateRangeParams),
    /// Rotation by a random multiple of 90 degrees (lossless).
    RotateRandom90,
    /// Affine shear with blank-wedge removal.
    Shear(ShearParams),
    /// Localized elastic grid distortion.
    Distort(DistortParams),
    /// Zoom with centre crop-back.
    Zoom(ZoomParams),
}

impl Transform {
    /// Apply the transform to `src`, writing the result into `dst`.
    ///
    /// The transform is computed at the source size; when `dst` has a
    /// different size the result is resampled into it (note that
    /// [`Transform::Rotate`] with an odd multiple of 90 degrees and
    /// [`Transform::RotateRandom90`] produce results with swapped
    /// dimensions). The source image is never mutated.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidDimensions`] when `src` or `dst` has zero
    /// area, plus the parameter and geometry errors of the individual
    /// transforms.
    pub fn apply<const C: usize, R: Rng + ?Sized>(
        &self,
        src: &Image<f32, C>,
        dst: &mut Image<f32, C>,
        rng: &mut R,
    ) -> Result<(), TransformError> {
        for size in [src.size(), dst.size()] {
            if size.area() == 0 {
                return Err(TransformError::InvalidDimensions(size.width, size.height));
            }
        }

        let result = match self {
            Transform::Skew(params) => skew::skew(src, params, rng)?,
            Transform::Rotate(params) => rotate::rotate(src, params)?,
            Transform::RotateRange(params) => rotate::rotate_range(src, params, rng)?,
            Transform::RotateRandom90 => rotate::rotate_random90(src, rng)?,
            Transform::Shear(params) => shear::shear(src, params, rng)?,
            Transform::Distort(params) => distort::distort(src, params, rng)?,
            Transform::Zoom(params) => zoom::zoom(src, params, rng)?,
        };

        if result.size() == dst.size() {
            dst.as_slice_mut().copy_from_slice(result.as_slice());
        } else {
            resize_native(&result, dst, InterpolationMode::Bicubic)?;
        }

        Ok(())
    }
}
