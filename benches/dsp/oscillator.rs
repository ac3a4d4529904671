//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vanalog::{
    dsp::{oscillator, NoiseSource, OscillatorParams, OscillatorState, Waveform},
    Note,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let mut noise = NoiseSource::seeded(7);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in Waveform::ALL {
            let params = OscillatorParams::new(waveform);
            let mut state = OscillatorState::default();
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    oscillator::generate(
                        black_box(&mut buffer),
                        &params,
                        &mut state,
                        Note::A4,
                        SAMPLE_RATE,
                        &mut noise,
                    );
                })
            });
        }

        // Hard sync - second phase accumulator and a reset branch
        let params = OscillatorParams::new(Waveform::Sawtooth).with_sync(700.0);
        let mut state = OscillatorState::default();
        group.bench_with_input(BenchmarkId::new("sawtooth_sync", size), &size, |b, _| {
            b.iter(|| {
                oscillator::generate(
                    black_box(&mut buffer),
                    &params,
                    &mut state,
                    Note::A4,
                    SAMPLE_RATE,
                    &mut noise,
                );
            })
        });
    }

    group.finish();
}
