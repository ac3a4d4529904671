//! Low-level DSP primitives used by the voice engine.
//!
//! These components are allocation-free and realtime-safe. Per-voice state is
//! kept in plain structs owned by the caller, so one shared configuration can
//! drive any number of voices.

/// Time-addressed attack/decay/sustain/release envelope.
pub mod envelope;
/// Resonant 2-pole low-pass filter with cutoff envelope.
pub mod filter;
/// Phase-accumulating oscillators, hard sync and noise.
pub mod oscillator;

pub use envelope::AdsrEnvelope;
pub use filter::{FilterSettings, FilterState};
pub use oscillator::{NoiseSource, OscillatorParams, OscillatorState, Waveform};
