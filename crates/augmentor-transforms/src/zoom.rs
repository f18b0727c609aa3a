use rand::Rng;

use augmentor_image::{Image, ImageSize};
use augmentor_imgproc::crop::crop_image;
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::resize::resize_native;

use crate::error::TransformError;

/// Parameters for a zoom with centre crop-back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomParams {
    /// Minimum zoom factor, at least 1.
    pub min_factor: f32,
    /// Maximum zoom factor, at least `min_factor`.
    pub max_factor: f32,
}

/// Zoom into an image and return a same-size result.
///
/// The factor is drawn uniformly from `[min_factor, max_factor]` and
/// rounded to two decimals. The image is enlarged by that factor and its
/// centre is cropped back to the original size.
pub fn zoom<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    params: &ZoomParams,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    if !(params.min_factor >= 1.0 && params.max_factor >= params.min_factor) {
        return Err(TransformError::InvalidParameter(format!(
            "zoom factors must satisfy 1 <= min <= max, got [{}, {}]",
            params.min_factor, params.max_factor
        )));
    }

    let factor = (rng.random_range(params.min_factor..=params.max_factor) * 100.0).round() / 100.0;

    let size = src.size();
    let zoomed_size = ImageSize {
        width: (size.width as f32 * factor).round() as usize,
        height: (size.height as f32 * factor).round() as usize,
    };

    let mut zoomed = Image::from_size_val(zoomed_size, 0.0)?;
    resize_native(src, &mut zoomed, InterpolationMode::Bicubic)?;

    // centre crop back to the original size
    let crop_x = (zoomed_size.width as f64 / 2.0 - (size.width as f64 / 2.0).ceil()).max(0.0);
    let crop_y = (zoomed_size.height as f64 / 2.0 - (size.height as f64 / 2.0).ceil()).max(0.0);

    let mut out = Image::from_size_val(size, 0.0)?;
    crop_image(&zoomed, &mut out, crop_x as usize, crop_y as usize)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use augmentor_image::{Image, ImageSize};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::TransformError;

    use super::ZoomParams;

    const SIZE: ImageSize = ImageSize {
        width: 64,
        height: 48,
    };

    #[test]
    fn zoom_output_keeps_size() -> Result<(), TransformError> {
        let src = Image::<f32, 3>::from_size_val(SIZE, 0.5)?;
        let params = ZoomParams {
            min_factor: 1.1,
            max_factor: 1.6,
        };

        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..5 {
            let out = super::zoom(&src, &params, &mut rng)?;
            assert_eq!(out.size(), SIZE);
        }

        Ok(())
    }

    #[test]
    fn unit_zoom_is_identity_sizewise() -> Result<(), TransformError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 5,
                height: 5,
            },
            (0..25).map(|x| x as f32).collect(),
        )?;

        let params = ZoomParams {
            min_factor: 1.0,
            max_factor: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let out = super::zoom(&src, &params, &mut rng)?;

        assert_eq!(out.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn zoom_validates_factors() {
        let src = Image::<f32, 1>::from_size_val(SIZE, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(43);

        for params in [
            ZoomParams {
                min_factor: 0.5,
                max_factor: 1.5,
            },
            ZoomParams {
                min_factor: 1.5,
                max_factor: 1.2,
            },
        ] {
            let res = super::zoom(&src, &params, &mut rng);
            assert!(matches!(res, Err(TransformError::InvalidParameter(_))));
        }
    }
}
