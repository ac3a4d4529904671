//! Real-world scenario benchmarks.
//!
//! These render whole blocks through `VAnalog` with the bundled presets,
//! from a single note up to dense chords.

mod voices;

pub use voices::bench_voices;
