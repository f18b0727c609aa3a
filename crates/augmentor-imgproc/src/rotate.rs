use augmentor_image::{Image, ImageError, ImageSize};

use crate::interpolation::InterpolationMode;
use crate::warp::{get_rotation_matrix2d, invert_affine_transform, warp_affine};

/// Size of the canvas that fully contains an image rotated by `angle` degrees.
///
/// # Example
///
/// ```
/// use augmentor_image::ImageSize;
/// use augmentor_imgproc::rotate::rotated_canvas_size;
///
/// let size = ImageSize { width: 4, height: 4 };
/// assert_eq!(rotated_canvas_size(size, 90.0), size);
/// ```
pub fn rotated_canvas_size(size: ImageSize, angle: f32) -> ImageSize {
    let rad = angle.to_radians();
    let (sin_a, cos_a) = (rad.sin().abs(), rad.cos().abs());

    let width = size.width as f32;
    let height = size.height as f32;

    ImageSize {
        width: (width * cos_a + height * sin_a).round() as usize,
        height: (width * sin_a + height * cos_a).round() as usize,
    }
}

/// Rotates an image by an arbitrary angle, expanding the canvas so that no
/// content is clipped.
///
/// A positive angle rotates counter-clockwise. Canvas regions not covered
/// by the rotated content are filled with zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `angle` - The rotation angle in degrees.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The rotated image on its expanded canvas.
pub fn rotate_expand<const C: usize>(
    src: &Image<f32, C>,
    angle: f32,
    interpolation: InterpolationMode,
) -> Result<Image<f32, C>, ImageError> {
    let src_size = src.size();
    let dst_size = rotated_canvas_size(src_size, angle);

    let center = (
        (src_size.width as f32 - 1.0) / 2.0,
        (src_size.height as f32 - 1.0) / 2.0,
    );

    // rotate about the source center, then shift into the expanded canvas
    let mut m = get_rotation_matrix2d(center, angle, 1.0);
    m[2] += (dst_size.width as f32 - src_size.width as f32) / 2.0;
    m[5] += (dst_size.height as f32 - src_size.height as f32) / 2.0;

    let m_inv = invert_affine_transform(&m);

    let mut dst = Image::from_size_val(dst_size, 0.0)?;
    warp_affine(src, &mut dst, &m_inv, interpolation)?;

    Ok(dst)
}

/// Rotates an image by exactly 90 degrees counter-clockwise.
///
/// This is a lossless pixel shuffle; no resampling takes place.
pub fn rotate90<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let (cols, rows) = (src.cols(), src.rows());
    let dst_size = ImageSize {
        width: rows,
        height: cols,
    };

    let src_data = src.as_slice();
    let mut dst_data = Vec::with_capacity(src_data.len());

    for i in 0..cols {
        for j in 0..rows {
            let offset = (j * cols + (cols - 1 - i)) * C;
            dst_data.extend_from_slice(&src_data[offset..offset + C]);
        }
    }

    Image::new(dst_size, dst_data)
}

/// Rotates an image by exactly 180 degrees.
///
/// This is a lossless pixel shuffle; no resampling takes place.
pub fn rotate180<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let (cols, rows) = (src.cols(), src.rows());

    let src_data = src.as_slice();
    let mut dst_data = Vec::with_capacity(src_data.len());

    for i in 0..rows {
        for j in 0..cols {
            let offset = ((rows - 1 - i) * cols + (cols - 1 - j)) * C;
            dst_data.extend_from_slice(&src_data[offset..offset + C]);
        }
    }

    Image::new(src.size(), dst_data)
}

/// Rotates an image by exactly 270 degrees counter-clockwise.
///
/// This is a lossless pixel shuffle; no resampling takes place.
pub fn rotate270<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy,
{
    let (cols, rows) = (src.cols(), src.rows());
    let dst_size = ImageSize {
        width: rows,
        height: cols,
    };

    let src_data = src.as_slice();
    let mut dst_data = Vec::with_capacity(src_data.len());

    for i in 0..cols {
        for j in 0..rows {
            let offset = ((rows - 1 - j) * cols + i) * C;
            dst_data.extend_from_slice(&src_data[offset..offset + C]);
        }
    }

    Image::new(dst_size, dst_data)
}
