use augmentor_image::{Image, ImageError};

use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// One cell of a warp mesh.
///
/// `rect` is an axis-aligned destination rectangle `[x0, y0, x1, y1]`
/// (exclusive right/bottom bounds) and `quad` holds the source
/// quadrilateral corners in {top-left, top-right, bottom-right,
/// bottom-left} order. Pixels inside `rect` sample the source at the
/// bilinear blend of the quad corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCell {
    /// Destination rectangle `[x0, y0, x1, y1]`.
    pub rect: [f32; 4],
    /// Source quadrilateral corners, {top-left, top-right, bottom-right, bottom-left}.
    pub quad: [[f32; 2]; 4],
}

impl MeshCell {
    // Source coordinates for the normalized cell position (u, v) in [0, 1]^2.
    fn source_point(&self, u: f32, v: f32) -> (f32, f32) {
        let [tl, tr, br, bl] = self.quad;
        let top_x = tl[0] + (tr[0] - tl[0]) * u;
        let top_y = tl[1] + (tr[1] - tl[1]) * u;
        let bottom_x = bl[0] + (br[0] - bl[0]) * u;
        let bottom_y = bl[1] + (br[1] - bl[1]) * u;
        (
            top_x + (bottom_x - top_x) * v,
            top_y + (bottom_y - top_y) * v,
        )
    }
}

/// Applies a piecewise mesh warp to an image.
///
/// Each mesh cell maps its destination rectangle onto a source
/// quadrilateral; destination pixels covered by no cell, or whose source
/// position falls outside the image, are left untouched. Cells are
/// expected to tile the destination without overlap, which makes the warp
/// seam-free whenever neighboring cells agree on their shared corners.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `mesh` - The mesh cells mapping destination rectangles to source quads.
/// * `interpolation` - The interpolation mode to use.
pub fn warp_mesh<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    mesh: &[MeshCell],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());

    // coordinate maps for the whole destination; pixels not covered by any
    // cell keep a negative coordinate and are skipped while resampling
    let mut map_x = vec![-1.0f32; dst_rows * dst_cols];
    let mut map_y = vec![-1.0f32; dst_rows * dst_cols];

    for cell in mesh {
        let [x0, y0, x1, y1] = cell.rect;
        let (width, height) = (x1 - x0, y1 - y0);
        if width <= 0.0 || height <= 0.0 {
            continue;
        }

        let col0 = (x0.max(0.0) as usize).min(dst_cols);
        let col1 = (x1.max(0.0) as usize).min(dst_cols);
        let row0 = (y0.max(0.0) as usize).min(dst_rows);
        let row1 = (y1.max(0.0) as usize).min(dst_rows);

        for row in row0..row1 {
            let v = (row as f32 - y0) / height;
            for col in col0..col1 {
                let u = (col as f32 - x0) / width;
                let (sx, sy) = cell.source_point(u, v);
                map_x[row * dst_cols + col] = sx;
                map_y[row * dst_cols + col] = sy;
            }
        }
    }

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
