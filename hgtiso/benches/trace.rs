use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hgtiso::contour;

const SRTM3_SAMPLES: usize = 1201;

/// Synthetic grid rising diagonally from 0 to ~1200m.
fn diagonal_ramp(size: usize) -> Vec<i16> {
    let mut samples = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            samples.push(((row + col) / 2) as i16);
        }
    }
    samples
}

fn bench_trace_small_grid(c: &mut Criterion) {
    let samples = diagonal_ramp(256);

    c.bench_function("trace_256_interval_25", |b| {
        b.iter(|| {
            black_box(contour::trace(black_box(&samples), 256, 25, &[]).unwrap());
        });
    });
}

fn bench_trace_srtm3_grid(c: &mut Criterion) {
    let samples = diagonal_ramp(SRTM3_SAMPLES);

    let mut group = c.benchmark_group("srtm3");
    group.sample_size(10);
    group.bench_function("trace_1201_interval_100", |b| {
        b.iter(|| {
            black_box(contour::trace(black_box(&samples), SRTM3_SAMPLES, 100, &[]).unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_trace_small_grid, bench_trace_srtm3_grid);
criterion_main!(benches);
