//! Benchmarks for the resonant 2-pole low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vanalog::dsp::{AdsrEnvelope, FilterSettings, FilterState};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    let cases = [
        ("lowpass", FilterSettings::lowpass(0.5, 0.3)),
        ("resonant", FilterSettings::lowpass(0.6, 0.95)),
        (
            "enveloped",
            FilterSettings::lowpass(0.3, 0.5).with_envelope(AdsrEnvelope::new(0.01, 0.3, 0.2, 0.2), 0.8),
        ),
        // Fully open: the bypass path
        ("open", FilterSettings::default()),
    ];

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size).map(|i| (i as f32 / size as f32) * 2.0 - 1.0).collect();

        for (name, settings) in &cases {
            let filter = settings.prepare().expect("valid filter settings");
            let mut state = FilterState::default();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.apply(0.1, 0.0, 0.0, &mut state, black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
