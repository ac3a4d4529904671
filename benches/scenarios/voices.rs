//! Benchmarks for the voice engine at increasing polyphony.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vanalog::{voices, Note, SynthEvent, SynthNode, VAnalog};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Engine for `patch` with `count` notes held, stacked in fifths from A2.
fn held_chord(patch: &vanalog::patch::Patch, count: u8) -> VAnalog {
    let mut synth = VAnalog::from_patch(patch);
    for i in 0..count {
        let note = Note::new(45 + (i * 7) % 48);
        synth.process_event(&SynthEvent::NoteOn { note }, 0.0);
    }
    synth
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let block_secs = size as f64 / SAMPLE_RATE as f64;

        // === ONE NOTE PER PRESET ===
        // Baseline for what a single voice of each patch costs
        for patch in voices::all() {
            let mut synth = held_chord(&patch, 1);
            let mut time = 0.0;
            let id = patch.name.replace(' ', "_");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, &size| {
                b.iter(|| {
                    synth.update(black_box(time), SAMPLE_RATE, size).expect("render");
                    time += block_secs;
                })
            });
        }

        // === POLYPHONY ===
        // Pad has slow envelopes, so every voice stays alive for the whole run
        for count in [4u8, 8, 16] {
            let mut synth = held_chord(&voices::pad(), count);
            let mut time = 0.0;
            group.bench_with_input(BenchmarkId::new(format!("pad_{count}_voices"), size), &size, |b, &size| {
                b.iter(|| {
                    synth.update(black_box(time), SAMPLE_RATE, size).expect("render");
                    time += block_secs;
                })
            });
        }
    }

    group.finish();
}
