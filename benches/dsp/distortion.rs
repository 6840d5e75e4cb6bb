//! Benchmarks for saturation and the soft limiter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::dsp::distortion::{hard_clip, saturate, soft_limit_5v_cubic, soft_limit_5v_tanh};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        // Hot signal in volts, well past full scale
        let input: Vec<f32> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 12.0)
            .collect();
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("saturate", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = saturate(black_box(x), 1.4);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("hard_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = hard_clip(black_box(x), 5.0, 11.7);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("limit_tanh", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = soft_limit_5v_tanh(black_box(x));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("limit_cubic", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = soft_limit_5v_cubic(black_box(x));
                }
            })
        });
    }

    group.finish();
}
