//! Benchmarks for PCM <-> float sample conversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use giztoy_wav::{BitDepth, Floating, Sampling, Scratch};

const CHANNELS: usize = 2;

fn pcm_for(depth: BitDepth, frames: usize) -> Vec<i32> {
    let span = i64::from(depth.max()) - i64::from(depth.min());
    (0..frames * CHANNELS)
        .map(|i| (i64::from(depth.min()) + span * (i as i64 % 97) / 97) as i32)
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for depth in BitDepth::ALL {
        let pcm = pcm_for(depth, 4096);
        let sampling = Sampling::new(depth);
        let mut out = Floating::with_capacity(CHANNELS, 4096);

        group.bench_with_input(BenchmarkId::new("frames_4096", depth.bits()), &pcm, |b, pcm| {
            b.iter(|| black_box(sampling.decode(pcm, &mut out)));
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for depth in BitDepth::ALL {
        let sampling = Sampling::new(depth);
        let mut floats = Floating::with_capacity(CHANNELS, 4096);
        sampling.decode(&pcm_for(depth, 4096), &mut floats);
        let mut scratch = Scratch::new(sampling, CHANNELS, 4096);

        group.bench_with_input(BenchmarkId::new("frames_4096", depth.bits()), &floats, |b, floats| {
            b.iter(|| black_box(scratch.encode(floats).len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
