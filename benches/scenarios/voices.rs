//! Benchmarks for the bass voice and the pump.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::io::Jack;
use tl_dsp::voices::{BassInputs, BassVoice, Pump, PumpInputs, Timbre};
use tl_dsp::{Module, ProcessCtx};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = ProcessCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === CLEAN BASS ===
        // sine/triangle → tanh, filter bypassed
        let mut bass = BassVoice::new(SAMPLE_RATE);
        let clean = BassInputs {
            trigger: Jack::patched(10.0),
            decay_knob: 10.0,
            ..BassInputs::default()
        };
        group.bench_with_input(BenchmarkId::new("bass_clean", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = bass.process(black_box(&clean), &ctx).out;
                }
            })
        });

        // === AGGRESSIVE BASS ===
        // square/saw/sub → tone filters → static low-pass macro
        let mut bass = BassVoice::new(SAMPLE_RATE);
        let aggressive = BassInputs {
            timbre: Timbre::Aggressive,
            filter_knob: -3.0,
            ..clean
        };
        group.bench_with_input(BenchmarkId::new("bass_aggressive", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = bass.process(black_box(&aggressive), &ctx).out;
                }
            })
        });

        // === FILTER CV SWEEP ===
        // Worst case: macro filter coefficients change every sample
        let mut bass = BassVoice::new(SAMPLE_RATE);
        let mut sweep = aggressive;
        sweep.filter_cv = Jack::patched(0.0);
        group.bench_with_input(BenchmarkId::new("bass_filter_sweep", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    sweep.filter_cv.voltage = -7.0 + 14.0 * i as f32 / size as f32;
                    *out = bass.process(black_box(&sweep), &ctx).out;
                }
            })
        });

        // === PUMP ===
        let mut pump = Pump::new(SAMPLE_RATE);
        let mut inputs = PumpInputs {
            left: Jack::patched(1.0),
            right: Jack::patched(-1.0),
            ..PumpInputs::default()
        };
        group.bench_with_input(BenchmarkId::new("pump", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    inputs.trigger_button = if i == 0 { 1.0 } else { 0.0 };
                    *out = pump.process(black_box(&inputs), &ctx).left;
                }
            })
        });
    }

    group.finish();
}
