/// Create coordinate maps for a destination grid from a mapping function.
///
/// The function `f` is called for every destination pixel `(x, y)` and must
/// return the corresponding source coordinates. The returned vectors have
/// `rows * cols` entries in row-major order, suitable for
/// [`crate::parallel::par_iter_rows_resample`].
///
/// # Arguments
///
/// * `cols` - The number of columns (width) of the destination grid.
/// * `rows` - The number of rows (height) of the destination grid.
/// * `f` - The mapping from destination pixel to source coordinates.
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32),
) -> (Vec<f32>, Vec<f32>) {
    let mut map_x = vec![0.0f32; rows * cols];
    let mut map_y = vec![0.0f32; rows * cols];

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r);
            map_x[r * cols + c] = x;
            map_y[r * cols + c] = y;
        }
    }

    (map_x, map_y)
}
