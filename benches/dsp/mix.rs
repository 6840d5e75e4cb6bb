//! Benchmarks for pan laws and dry/wet blending.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::dsp::mix::{blend_frames, StereoFrame};
use tl_dsp::dsp::pan::StereoGains;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut frames = vec![StereoFrame::SILENCE; size];

        // Pan recomputed every sample, as with a patched pan CV
        group.bench_with_input(BenchmarkId::new("pan_per_sample", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in frames.iter_mut().zip(input.iter()) {
                    let gains = StereoGains::pan(black_box(x));
                    let (left, right) = gains.apply(x, x);
                    *out = StereoFrame::new(left, right);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in frames.iter_mut().zip(input.iter()) {
                    let dry = StereoFrame::mono(x);
                    *out = blend_frames(dry, dry * 0.3, black_box(0.7));
                }
            })
        });
    }

    group.finish();
}
