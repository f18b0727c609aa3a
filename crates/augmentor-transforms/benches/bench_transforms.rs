use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use augmentor_image::{Image, ImageSize};
use augmentor_transforms::distort::DistortParams;
use augmentor_transforms::skew::{SkewKind, SkewParams};
use augmentor_transforms::Transform;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let image_sizes = vec![(256, 224), (512, 448)];

    let transforms = [
        (
            "skew",
            Transform::Skew(SkewParams {
                kind: SkewKind::Tilt,
                magnitude: Some(8.0),
            }),
        ),
        (
            "distort",
            Transform::Distort(DistortParams {
                grid_width: 8,
                grid_height: 8,
                magnitude: 4,
            }),
        ),
    ];

    for (width, height) in image_sizes {
        let image_size = ImageSize { width, height };
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let image_f32 = image.cast::<f32>().unwrap();

        for (name, transform) in &transforms {
            let id = format!("{}_{}x{}", name, width, height);
            group.bench_with_input(BenchmarkId::new("engine", &id), &image_f32, |b, i| {
                b.iter(|| {
                    let mut dst = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();
                    let mut rng = StdRng::seed_from_u64(0);
                    transform.apply(black_box(i), &mut dst, &mut rng)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
