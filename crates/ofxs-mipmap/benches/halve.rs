//! Benchmarks for the box-halving filter and pyramid builders.
//!
//! Run with: `cargo bench -p ofxs-mipmap`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use ofxs_core::{ImageView, ImageViewMut, RectI};
use ofxs_mipmap::{MipMapContext, MipMapSet, build_mip_map_level, build_mip_maps_for_components, halve_window};

fn gradient(bounds: RectI, components: usize) -> Vec<f32> {
    (0..bounds.area() * components)
        .map(|i| (i % 251) as f32 / 251.0)
        .collect()
}

/// Benchmark one halving pass over RGBA images.
fn bench_halve(c: &mut Criterion) {
    let mut group = c.benchmark_group("halve");

    for size in [256, 1024, 2048].iter() {
        let full = RectI::from_size(*size, *size);
        let half = full.downscale_power_of_two_smallest_enclosing(1);
        let data = gradient(full, 4);
        let src = ImageView::new(&data, full, full.width() * 4, 4).unwrap();
        let mut out = vec![0.0f32; half.area() * 4];

        group.throughput(Throughput::Elements(full.area() as u64));

        group.bench_with_input(BenchmarkId::new("rgba", size), &src, |b, src| {
            b.iter(|| {
                let mut dst = ImageViewMut::new(&mut out, half, half.width() * 4, 4).unwrap();
                halve_window::<f32, 4>(black_box(half), src, &mut dst);
            })
        });
    }

    group.finish();
}

/// Benchmark level builds against a full pyramid.
fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("levels");
    let ctx = MipMapContext::new();

    let full = RectI::from_size(1920, 1080);
    let data = gradient(full, 4);
    let src = ImageView::new(&data, full, full.width() * 4, 4).unwrap();
    group.throughput(Throughput::Elements(full.area() as u64));

    for level in [1u32, 3, 5].iter() {
        let window = full.downscale_power_of_two_smallest_enclosing(*level);
        let mut out = vec![0.0f32; window.area() * 4];

        group.bench_with_input(BenchmarkId::new("single_level", level), level, |b, &level| {
            b.iter(|| {
                let mut dst = ImageViewMut::new(&mut out, window, window.width() * 4, 4).unwrap();
                build_mip_map_level::<f32, 4, _, _>(&ctx, window, full, level, &src, &mut dst).unwrap();
            })
        });
    }

    group.bench_function("pyramid_5", |b| {
        b.iter(|| {
            let mut set = MipMapSet::<f32>::with_levels(5);
            build_mip_maps_for_components::<f32, 4, _, _>(&ctx, full, &src, 5, &mut set).unwrap();
            black_box(set)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_halve, bench_levels);
criterion_main!(benches);
