//! Benchmarks for the PolyBLEP oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tl_dsp::dsp::oscillator::{PolyBlepOscillator, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    let waveforms = [
        ("sine", Waveform::Sine),
        ("triangle", Waveform::Triangle),
        ("saw", Waveform::Saw),
        ("square", Waveform::Square),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in waveforms {
            let mut osc = PolyBlepOscillator::new(440.0, SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for out in buffer.iter_mut() {
                        osc.advance();
                        *out = osc.read(black_box(waveform));
                    }
                })
            });
        }

        // Every shape from one phase, as the bass voice reads them
        let mut osc = PolyBlepOscillator::new(65.4, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("all_shapes", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    osc.advance();
                    *out = osc.sine() + osc.triangle() + osc.saw() + osc.square(0.48) + osc.sub_sine();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
