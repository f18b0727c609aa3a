use augmentor::image::{Image, ImageSize};
use augmentor::transforms::distort::DistortParams;
use augmentor::transforms::rotate::RotateRangeParams;
use augmentor::transforms::shear::ShearParams;
use augmentor::transforms::skew::{SkewKind, SkewParams};
use augmentor::transforms::zoom::ZoomParams;
use augmentor::transforms::{Transform, TransformError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), TransformError> {
    env_logger::init();

    let size = ImageSize {
        width: 320,
        height: 240,
    };

    // synthetic gradient image, three channels
    let mut data = Vec::with_capacity(size.area() * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            data.push(x as f32 / size.width as f32);
            data.push(y as f32 / size.height as f32);
            data.push(0.5);
        }
    }
    let src = Image::<f32, 3>::new(size, data)?;

    let transforms = [
        (
            "skew",
            Transform::Skew(SkewParams {
                kind: SkewKind::Tilt,
                magnitude: Some(6.0),
            }),
        ),
        (
            "rotate_range",
            Transform::RotateRange(RotateRangeParams {
                max_left: 20,
                max_right: 20,
            }),
        ),
        (
            "shear",
            Transform::Shear(ShearParams {
                max_shear_left: 15.0,
                max_shear_right: 15.0,
                axis: None,
            }),
        ),
        (
            "distort",
            Transform::Distort(DistortParams {
                grid_width: 6,
                grid_height: 6,
                magnitude: 4,
            }),
        ),
        (
            "zoom",
            Transform::Zoom(ZoomParams {
                min_factor: 1.1,
                max_factor: 1.5,
            }),
        ),
    ];

    let mut rng = StdRng::seed_from_u64(7);

    for (name, transform) in &transforms {
        let mut dst = Image::<f32, 3>::from_size_val(size, 0.0)?;
        transform.apply(&src, &mut dst, &mut rng)?;

        let mean: f32 =
            dst.as_slice().iter().sum::<f32>() / dst.as_slice().len() as f32;
        log::info!("{name}: output {} mean intensity {mean:.3}", dst.size());
        println!("{name}: {} -> {}", src.size(), dst.size());
    }

    Ok(())
}
