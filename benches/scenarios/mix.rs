//! Benchmarks for the seven-channel mixer.
//!
//! These simulate a full patch: every channel fed, some in stereo, some
//! panned by CV.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::io::Jack;
use tl_dsp::mixer::{MixerInputs, CHANNEL_COUNT};
use tl_dsp::{Mixer, Module, ProcessCtx};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn full_patch() -> MixerInputs {
    let mut inputs = MixerInputs {
        master: 80.0,
        ..MixerInputs::default()
    };
    for (i, ch) in inputs.channels.iter_mut().enumerate() {
        ch.left = Jack::patched(0.5);
        if i % 2 == 0 {
            ch.right = Jack::patched(-0.5);
        }
        ch.volume = 7.0;
        ch.pan = i as f32 / CHANNEL_COUNT as f32 - 0.5;
        ch.cut = i < 3;
    }
    inputs
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let ctx = ProcessCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === KNOB PANS ===
        // Pan gains come from the per-channel cache
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let inputs = full_patch();
        group.bench_with_input(BenchmarkId::new("mixer_7ch", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = mixer.process(black_box(&inputs), &ctx).left;
                }
            })
        });

        // === CV PANS ===
        // Every channel recomputes its pan law each sample
        let mut mixer = Mixer::new(SAMPLE_RATE);
        let mut inputs = full_patch();
        group.bench_with_input(BenchmarkId::new("mixer_7ch_pan_cv", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    let cv = -5.0 + 10.0 * i as f32 / size as f32;
                    for ch in inputs.channels.iter_mut() {
                        ch.pan_cv = Jack::patched(cv);
                    }
                    *out = mixer.process(black_box(&inputs), &ctx).left;
                }
            })
        });
    }

    group.finish();
}
