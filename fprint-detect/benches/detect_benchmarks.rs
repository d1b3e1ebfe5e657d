use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fprint_core::{DetectConfig, Image};
use fprint_detect::{FastDetector, ImagePyramid};

/// Benchmark image with ridge-like stripes and scattered bright blobs
fn create_benchmark_image(width: usize, height: usize) -> Image {
    let mut img = vec![110u8; width * height];

    // Coarse ridge pattern
    for y in 0..height {
        for x in 0..width {
            if (x / 4 + y / 4) % 2 == 0 {
                img[y * width + x] = 140;
            }
        }
    }

    // Blobs that trigger the ring test
    for i in 0..24 {
        let cx = 8 + (i * 37) % (width - 16);
        let cy = 8 + (i * 53) % (height - 16);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                img[y * width + x] = 255;
            }
        }
    }

    img
}

fn bench_config() -> DetectConfig {
    DetectConfig {
        threshold: 20,
        patch_size: 15,
        n_threads: 1,
    }
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");

    for &(width, height) in &[(128usize, 128usize), (256, 256), (512, 512)] {
        let detector = FastDetector::new(bench_config(), width, height).unwrap();
        let img = create_benchmark_image(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(detector, img),
            |b, (detector, img)| b.iter(|| black_box(detector.detect(black_box(img)).unwrap())),
        );
    }

    group.finish();
}

fn bench_pyramid(c: &mut Criterion) {
    let (width, height) = (256, 256);
    let img = create_benchmark_image(width, height);
    let levels = ImagePyramid::generate_scale_levels(width, height);

    c.bench_function("pyramid_build_256", |b| {
        b.iter(|| black_box(ImagePyramid::build(black_box(&img), width, height, &levels).unwrap()))
    });
}

criterion_group!(benches, bench_detection, bench_pyramid);
criterion_main!(benches);
