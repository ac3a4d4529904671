//! Benchmarks for ADSR envelope evaluation.
//!
//! The engine only samples the envelope at block edges, so this measures a
//! per-sample sweep as the worst case.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vanalog::dsp::AdsrEnvelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = AdsrEnvelope::new(0.1, 0.1, 0.7, 0.3);
    let step = 1.0 / SAMPLE_RATE as f64;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up)
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = env.value(black_box(i as f64 * step), 0.0, 0.0, 0.0, 0.0);
                }
            })
        });

        // Sustain phase (holding steady)
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = env.value(black_box(1.0 + i as f64 * step), 0.0, 0.0, 0.0, 0.0);
                }
            })
        });

        // Release phase (ramping down)
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = env.value(black_box(1.05 + i as f64 * step), 0.0, 1.0, 0.0, 0.7);
                }
            })
        });
    }

    group.finish();
}
