//! Benchmarks for decay and shaped envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::dsp::envelope::{DecayEnvelope, DuckShape, ShapedEnvelope, DEFAULT_MIN_GAIN};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let sample_time = 1.0 / SAMPLE_RATE;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut decay = DecayEnvelope::new();
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                decay.trigger(black_box(0.0), SAMPLE_RATE);
                for out in buffer.iter_mut() {
                    *out = decay.process();
                }
            })
        });

        for (name, shape) in [("duck", DuckShape::PUMP), ("gate", DuckShape::GATE)] {
            let mut env = ShapedEnvelope::new(shape, DEFAULT_MIN_GAIN);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    env.trigger();
                    for out in buffer.iter_mut() {
                        *out = env.process(black_box(sample_time));
                    }
                })
            });
        }
    }

    group.finish();
}
