use collage_core::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn generate_sizes(count: usize, min_size: u32, max_size: u32) -> Vec<(u32, u32)> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (w, h)
        })
        .collect()
}

fn bench_layout_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_strategies");

    for count in [10, 100, 1000] {
        let sizes = generate_sizes(count, 64, 4096);
        group.throughput(Throughput::Elements(count as u64));

        for strategy in [
            Strategy::Grid,
            Strategy::Lanes,
            Strategy::GoldenSplit,
            Strategy::AspectGrid,
            Strategy::Auto,
        ] {
            let cfg = LayoutConfig::builder()
                .with_canvas(8192, 8192)
                .padding(2)
                .strategy(strategy)
                .scaling_factor(0.25)
                .build();
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), count),
                &sizes,
                |b, sizes| b.iter(|| black_box(pack_layout(sizes, &cfg))),
            );
        }
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    use image::{DynamicImage, Rgba, RgbaImage};
    let inputs: Vec<InputImage> = (0..9)
        .map(|i| InputImage {
            key: format!("tile_{i}"),
            image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                320 + i * 16,
                240,
                Rgba([i as u8 * 20, 90, 160, 255]),
            )),
        })
        .collect();
    let cfg = LayoutConfig::builder()
        .with_canvas(1024, 1024)
        .padding(8)
        .strategy(Strategy::Grid)
        .build();
    c.bench_function("compose_grid_9", |b| {
        b.iter(|| black_box(compose_collage(&inputs, &cfg, Rgba([255, 255, 255, 255]))))
    });
}

criterion_group!(benches, bench_layout_strategies, bench_compose);
criterion_main!(benches);
