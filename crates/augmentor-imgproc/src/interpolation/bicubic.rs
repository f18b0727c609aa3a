use augmentor_image::Image;

// Keys cubic convolution kernel with a = -0.5 (Catmull-Rom).
fn cubic_weight(t: f32) -> f32 {
    const A: f32 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        (A + 2.0) * t * t * t - (A + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        A * t * t * t - 5.0 * A * t * t + 8.0 * A * t - 4.0 * A
    } else {
        0.0
    }
}

/// Kernel for bicubic interpolation over a 4x4 pixel neighborhood.
///
/// Samples outside the image borders are clamped to the nearest edge pixel.
pub(crate) fn bicubic_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    c: usize,
) -> f32 {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = u.floor();
    let iv = v.floor();

    let frac_u = u - iu;
    let frac_v = v - iv;

    let data = image.as_slice();

    let mut sum = 0.0f32;
    let mut weight_sum = 0.0f32;

    for j in -1..3i64 {
        let y = (iv as i64 + j).clamp(0, rows as i64 - 1) as usize;
        let wy = cubic_weight(j as f32 - frac_v);
        for i in -1..3i64 {
            let x = (iu as i64 + i).clamp(0, cols as i64 - 1) as usize;
            let wx = cubic_weight(i as f32 - frac_u);
            let w = wx * wy;
            sum += data[(y * cols + x) * C + c] * w;
            weight_sum += w;
        }
    }

    sum / weight_sum
}
