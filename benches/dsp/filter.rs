//! Benchmarks for one-pole, biquad and macro filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::dsp::filter::{Biquad, OnePoleHighPass};
use tl_dsp::dsp::macro_filter::MacroFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        let mut hp1 = OnePoleHighPass::new(180.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("hp1", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = hp1.process(black_box(x));
                }
            })
        });

        let mut lowpass = Biquad::lowpass(1_000.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("biquad_lowpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = lowpass.process(black_box(x));
                }
            })
        });

        // Static knob: coefficients come from the cache
        let mut macro_filter = MacroFilter::new();
        group.bench_with_input(BenchmarkId::new("macro_static", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = macro_filter.process(black_box(x), -4.0, SAMPLE_RATE);
                }
            })
        });

        // Moving knob: every sample recomputes coefficients
        let mut macro_filter = MacroFilter::new();
        group.bench_with_input(BenchmarkId::new("macro_sweep", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &x)) in buffer.iter_mut().zip(input.iter()).enumerate() {
                    let param = -10.0 + 20.0 * i as f32 / size as f32;
                    *out = macro_filter.process(black_box(x), param, SAMPLE_RATE);
                }
            })
        });
    }

    group.finish();
}
