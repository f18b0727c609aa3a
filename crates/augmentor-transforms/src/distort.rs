use rand::Rng;

use augmentor_image::{Image, ImageSize};
use augmentor_imgproc::interpolation::InterpolationMode;
use augmentor_imgproc::warp::{warp_mesh, MeshCell};

use crate::error::TransformError;
use crate::geometry::{Point, Quad, Rect};

/// Parameters for a localized elastic grid distortion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistortParams {
    /// Number of grid cells along the x axis, at least 1.
    pub grid_width: usize,
    /// Number of grid cells along the y axis, at least 1.
    pub grid_height: usize,
    /// Maximum vertex displacement in pixels, non-negative.
    pub magnitude: i32,
}

fn validate(size: ImageSize, params: &DistortParams) -> Result<(), TransformError> {
    if params.grid_width == 0 || params.grid_height == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "grid dimensions must be at least 1x1, got {}x{}",
            params.grid_width, params.grid_height
        )));
    }
    if params.magnitude < 0 {
        return Err(TransformError::InvalidParameter(format!(
            "distortion magnitude must be non-negative, got {}",
            params.magnitude
        )));
    }
    if size.width / params.grid_width == 0 || size.height / params.grid_height == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "grid {}x{} is finer than the {} image",
            params.grid_width, params.grid_height, size
        )));
    }
    Ok(())
}

/// Generate the distortion mesh for an image of the given size.
///
/// The image is tiled into `grid_width x grid_height` cells, the last row
/// and column absorbing the remainder of the integer division. Every
/// interior grid vertex receives one displacement, drawn uniformly from
/// `[-magnitude, magnitude]` per component, and that displacement is
/// applied to the matching corner of every cell sharing the vertex, so the
/// warped cells keep meeting edge to edge. Vertices on the image boundary
/// are never displaced.
pub(crate) fn generate_mesh<R: Rng + ?Sized>(
    size: ImageSize,
    params: &DistortParams,
    rng: &mut R,
) -> Result<Vec<(Rect, Quad)>, TransformError> {
    validate(size, params)?;

    let (grid_w, grid_h) = (params.grid_width, params.grid_height);
    let cell_w = size.width / grid_w;
    let cell_h = size.height / grid_h;

    // vertex (vx, vy) position; the outer boundary sticks to the image edge
    let vertex_x = |vx: usize| {
        if vx == grid_w {
            size.width as i64
        } else {
            (vx * cell_w) as i64
        }
    };
    let vertex_y = |vy: usize| {
        if vy == grid_h {
            size.height as i64
        } else {
            (vy * cell_h) as i64
        }
    };

    // one displacement per interior vertex, shared by all adjacent cells
    let mut shifts = vec![(0i32, 0i32); (grid_w + 1) * (grid_h + 1)];
    for vy in 1..grid_h {
        for vx in 1..grid_w {
            let dx = rng.random_range(-params.magnitude..=params.magnitude);
            let dy = rng.random_range(-params.magnitude..=params.magnitude);
            shifts[vy * (grid_w + 1) + vx] = (dx, dy);
        }
    }

    let mut mesh = Vec::with_capacity(grid_w * grid_h);
    for cy in 0..grid_h {
        for cx in 0..grid_w {
            let rect = Rect {
                x0: vertex_x(cx),
                y0: vertex_y(cy),
                x1: vertex_x(cx + 1),
                y1: vertex_y(cy + 1),
            };

            // cell corners in {top-left, top-right, bottom-right, bottom-left}
            // order, each displaced by its shared vertex shift
            let corners = [
                (cx, cy),
                (cx + 1, cy),
                (cx + 1, cy + 1),
                (cx, cy + 1),
            ];
            let points = corners.map(|(vx, vy)| {
                let (dx, dy) = shifts[vy * (grid_w + 1) + vx];
                Point::new(
                    (vertex_x(vx) + dx as i64) as f64,
                    (vertex_y(vy) + dy as i64) as f64,
                )
            });

            mesh.push((rect, Quad { points }));
        }
    }

    Ok(mesh)
}

/// Distort an image with a randomized elastic grid and return a same-size
/// result.
pub fn distort<const C: usize, R: Rng + ?Sized>(
    src: &Image<f32, C>,
    params: &DistortParams,
    rng: &mut R,
) -> Result<Image<f32, C>, TransformError> {
    let size = src.size();
    let mesh = generate_mesh(size, params, rng)?;

    let cells = mesh
        .iter()
        .map(|(rect, quad)| MeshCell {
            rect: [
                rect.x0 as f32,
                rect.y0 as f32,
                rect.x1 as f32,
                rect.y1 as f32,
            ],
            quad: quad.points.map(|p| [p.x as f32, p.y as f32]),
        })
        .collect::<Vec<_>>();

    let mut dst = Image::from_size_val(size, 0.0)?;
    warp_mesh(src, &mut dst, &cells, InterpolationMode::Bicubic)?;

    Ok(dst)
}
